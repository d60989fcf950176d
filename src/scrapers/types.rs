use serde::{Deserialize, Serialize};

/// Search page body together with the session cookie it set
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub html: String,
    pub session_cookie: Option<String>,
}

/// Anti-forgery tokens required by the "load more" endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// `csrftoken` cookie value
    pub cookie: String,
    /// `csrfmiddlewaretoken` form value, taken from the page script
    pub form: String,
}

/// JSON envelope returned by the "load more" endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadMoreResponse {
    /// Fragment with the next batch of listing summaries
    pub html: String,
    /// Set on the final batch
    pub last: bool,
}
