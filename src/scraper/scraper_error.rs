use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("Failed to read body: {0}")]
    Body(String),
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScraperError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ScraperError::HttpStatus(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            ScraperError::Body(e.to_string())
        } else {
            ScraperError::Network(e.to_string())
        }
    }
}
