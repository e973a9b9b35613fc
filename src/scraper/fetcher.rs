// fetcher.rs
use crate::config::FetchConfig;
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// Capability for retrieving raw page markup.
pub trait PageFetcher {
    fn fetch(&self, url: &str, config: &FetchConfig) -> Result<String, ScraperError>;
}

/// Blocking HTTP fetcher. Holds only the connection pool; timeout and user
/// agent come from the `FetchConfig` of each call.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str, config: &FetchConfig) -> Result<String, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let resp = self
            .client
            .get(url)
            .headers(headers)
            .timeout(config.timeout)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus(status.as_u16()));
        }

        let text = resp.text()?;
        Ok(text)
    }
}
