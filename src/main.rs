mod config;
mod error;
mod models;
mod output;
mod rules;
mod scrapers;

use anyhow::Context;
use chrono::Utc;
use config::Settings;
use scrapers::{collect_listing_urls, scrape_vacancies, DouScraper};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("💼 Vacancy Scout - DOU Scraper");
    info!("==============================");

    let settings = Settings::load().context("Failed to load settings")?;
    let started_at = Utc::now();

    let scraper = DouScraper::new(&settings).context("Failed to create HTTP client")?;

    let urls = collect_listing_urls(&scraper, &settings)
        .await
        .context("Failed to collect listing urls")?;

    let vacancies = scrape_vacancies(&scraper, &settings, urls)
        .await
        .context("Failed to scrape vacancies")?;

    let path = settings.output_path();
    output::write_csv(&vacancies, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Saved {} vacancies to {}", vacancies.len(), path.display());

    if let Some(snapshot) = &settings.json_snapshot {
        output::write_json_snapshot(&vacancies, snapshot)
            .with_context(|| format!("Failed to write {}", snapshot.display()))?;
        info!("💾 Saved JSON snapshot to {}", snapshot.display());
    }

    let elapsed = Utc::now() - started_at;
    info!(
        "✅ Done in {}.{:03}s",
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000
    );

    Ok(())
}
