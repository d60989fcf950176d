use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::models::{Salary, Vacancy};
use crate::rules::{classify_experience, parse_salary, PageText};
use crate::scrapers::traits::VacancySource;
use chrono::Utc;
use futures::{stream, StreamExt, TryStreamExt};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::{debug, info};

lazy_static! {
    static ref VACANCY_BLOCK: Selector = Selector::parse(".b-vacancy").unwrap();
    static ref SALARY: Selector = Selector::parse(".salary").unwrap();
}

/// Turns a detail page into a [`Vacancy`] using the configured rule tables
pub struct DetailExtractor<'a> {
    settings: &'a Settings,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn parse(&self, url: &str, html: &str) -> Result<Vacancy> {
        let document = Html::parse_document(html);
        let block = document
            .select(&VACANCY_BLOCK)
            .next()
            .ok_or_else(|| ScrapeError::ContentNotFound {
                url: url.to_string(),
                what: ".b-vacancy",
            })?;

        let text = PageText::new(block.text());

        let salary = match block.select(&SALARY).next() {
            Some(node) => parse_salary(&node.text().collect::<String>()),
            None => Salary::default(),
        };

        Ok(Vacancy {
            url: url.to_string(),
            is_remote: text.contains_any(&self.settings.remote_keywords),
            is_part_time: text.contains_any(&self.settings.part_time_keywords),
            experience: classify_experience(&text, &self.settings.experience_rules),
            salary_min: salary.min,
            salary_max: salary.max,
            technologies: text.matching(&self.settings.technologies),
            tags: text.matching(&self.settings.tags),
            scraped_at: Utc::now(),
        })
    }
}

/// Fetch and parse every detail page.
///
/// At most `max_concurrent_requests` pages are in flight. Results keep the
/// order of `urls`, and the first failure aborts the whole batch.
pub async fn scrape_vacancies<S>(
    source: &S,
    settings: &Settings,
    urls: Vec<String>,
) -> Result<Vec<Vacancy>>
where
    S: VacancySource + ?Sized,
{
    let total = urls.len();
    let extractor = DetailExtractor::new(settings);
    let extractor = &extractor;

    info!("Parsing {} vacancies...", total);
    let pages = stream::iter(urls)
        .map(move |url| async move {
            let html = source.detail_page(&url).await?;
            extractor.parse(&url, &html)
        })
        .buffered(settings.max_concurrent_requests.max(1));
    tokio::pin!(pages);

    let mut vacancies = Vec::with_capacity(total);
    while let Some(vacancy) = pages.try_next().await? {
        debug!("Parsed {}", vacancy.url);
        vacancies.push(vacancy);

        let done = vacancies.len();
        if done % 20 == 0 || done == total {
            info!("Parsing vacancies: {}/{}", done, total);
        }
    }

    Ok(vacancies)
}
