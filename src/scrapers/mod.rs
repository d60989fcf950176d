pub mod detail;
pub mod dou;
pub mod listing;
pub mod traits;
pub mod types;

pub use detail::scrape_vacancies;
pub use dou::DouScraper;
pub use listing::collect_listing_urls;
