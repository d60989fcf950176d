use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::scrapers::traits::VacancySource;
use crate::scrapers::types::{LoadMoreResponse, SearchPage, SessionTokens};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

/// Name of the session cookie set by the search page
pub const CSRF_COOKIE: &str = "csrftoken";

/// jobs.dou.ua transport
pub struct DouScraper {
    client: Client,
    search_url: Url,
    load_more_url: Url,
}

impl DouScraper {
    /// Create a client carrying the configured headers and timeout
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .default_headers(default_headers(settings)?)
            .build()?;

        Ok(Self {
            client,
            search_url: settings.search_url()?,
            load_more_url: settings.load_more_url()?,
        })
    }
}

fn default_headers(settings: &Settings) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &settings.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ScrapeError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ScrapeError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        warn!("{} returned status: {}", response.url(), status);
        return Err(ScrapeError::RequestNotOk {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

#[async_trait]
impl VacancySource for DouScraper {
    async fn search_page(&self) -> Result<SearchPage> {
        debug!("Fetching search page: {}", self.search_url);

        let response = self.client.get(self.search_url.clone()).send().await?;
        let response = ensure_success(response)?;

        let session_cookie = response
            .cookies()
            .find(|c| c.name() == CSRF_COOKIE)
            .map(|c| c.value().to_string());
        let html = response.text().await?;

        debug!("Downloaded {} bytes of search page HTML", html.len());
        Ok(SearchPage {
            html,
            session_cookie,
        })
    }

    async fn load_more(&self, tokens: &SessionTokens, count: u32) -> Result<LoadMoreResponse> {
        debug!("Requesting more listings, count: {}", count);

        let count = count.to_string();
        let response = self
            .client
            .post(self.load_more_url.clone())
            .header(COOKIE, format!("{}={}", CSRF_COOKIE, tokens.cookie))
            .form(&[
                ("csrfmiddlewaretoken", tokens.form.as_str()),
                ("count", count.as_str()),
            ])
            .send()
            .await?;

        let page: LoadMoreResponse = ensure_success(response)?.json().await?;
        Ok(page)
    }

    async fn detail_page(&self, url: &str) -> Result<String> {
        debug!("Fetching detail page: {}", url);

        let response = self.client.get(url).send().await?;
        let html = ensure_success(response)?.text().await?;
        Ok(html)
    }

    fn source_name(&self) -> &'static str {
        "DOU"
    }
}
