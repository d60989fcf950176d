use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Token not found: '{0}'")]
    TokenNotFound(&'static str),
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request to '{url}' returned status {status}")]
    RequestNotOk { url: String, status: u16 },
    #[error("Content not found in html of '{url}': '{what}'")]
    ContentNotFound { url: String, what: &'static str },
    #[error("Invalid url: '{0}'")]
    Url(#[from] url::ParseError),
    #[error("Invalid header: '{0}'")]
    InvalidHeader(String),
    #[error("Invalid configuration: '{0}'")]
    InvalidConfig(&'static str),
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Csv error: '{0}'")]
    Csv(#[from] csv::Error),
    #[error("Json error: '{0}'")]
    Json(#[from] serde_json::Error),
}
