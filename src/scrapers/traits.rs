use crate::error::Result;
use crate::scrapers::types::{LoadMoreResponse, SearchPage, SessionTokens};
use async_trait::async_trait;

/// Transport for a vacancy listing site.
///
/// The pagination protocol and page parsing live outside of this trait, so
/// any implementation only has to move bytes.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Fetch the initial search page
    async fn search_page(&self) -> Result<SearchPage>;

    /// Request the next batch of listings starting at `count`
    async fn load_more(&self, tokens: &SessionTokens, count: u32) -> Result<LoadMoreResponse>;

    /// Fetch the body of one listing's detail page
    async fn detail_page(&self, url: &str) -> Result<String>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
