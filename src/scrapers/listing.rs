use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::scrapers::traits::VacancySource;
use crate::scrapers::types::SessionTokens;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

/// Offset sent with the first "load more" request
pub const FIRST_OFFSET: u32 = 20;
/// Offset increment between "load more" requests
pub const OFFSET_STEP: u32 = 40;

lazy_static! {
    static ref FORM_TOKEN: Regex = Regex::new(r#"window\.CSRF_TOKEN\s*=\s*"(.+?)""#).unwrap();
    static ref SCRIPT: Selector = Selector::parse("script").unwrap();
    static ref LISTING_LINK: Selector = Selector::parse("a.vt").unwrap();
}

/// Offset sent on the `round`-th "load more" request, counting from 1
pub fn offset_for_round(round: u32) -> u32 {
    FIRST_OFFSET + OFFSET_STEP * round.saturating_sub(1)
}

/// Token assigned to `window.CSRF_TOKEN` in an inline script
pub fn extract_form_token(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT)
        .find_map(|script| {
            let body = script.text().collect::<String>();
            FORM_TOKEN
                .captures(&body)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .ok_or(ScrapeError::TokenNotFound("window.CSRF_TOKEN"))
}

/// `href` of every listing link in document order, duplicates kept.
///
/// Blank `href`s are skipped; resolved against `base` they would point at
/// the site root instead of a listing.
pub fn extract_listing_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LISTING_LINK)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| match base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => href.to_string(),
        })
        .collect()
}

/// Walk the search results and collect every listing's detail-page URL.
///
/// The search page comes first, then each "load more" fragment in request
/// order. Stops on the first response flagged `last`, or after
/// `settings.max_pages` rounds.
pub async fn collect_listing_urls<S>(source: &S, settings: &Settings) -> Result<Vec<String>>
where
    S: VacancySource + ?Sized,
{
    let base = settings.base()?;

    info!("Opening {} search page for '{}'...", source.source_name(), settings.search);
    let search_page = source.search_page().await?;

    let tokens = SessionTokens {
        form: extract_form_token(&search_page.html)?,
        cookie: search_page
            .session_cookie
            .ok_or(ScrapeError::TokenNotFound("csrftoken cookie"))?,
    };
    let mut urls = extract_listing_links(&search_page.html, &base);
    debug!("Found {} listings on the search page", urls.len());

    let mut round = 1;
    loop {
        if round > settings.max_pages {
            warn!(
                "Stopped after {} \"load more\" rounds without a last page",
                settings.max_pages
            );
            break;
        }

        let count = offset_for_round(round);
        let page = source.load_more(&tokens, count).await?;
        let links = extract_listing_links(&page.html, &base);
        debug!("Round {} (count {}): {} listings", round, count, links.len());
        urls.extend(links);

        if page.last {
            break;
        }
        round += 1;
    }

    info!("Collected {} listing urls", urls.len());
    Ok(urls)
}
