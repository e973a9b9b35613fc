// config.rs
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request settings for page fetches. Passed explicitly on every call so a
/// single fetcher can be shared between differently configured batches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub fetch: FetchConfig,
    pub geocode_timeout: Duration,
    pub places_timeout: Duration,
    /// Fixed sleep between consecutive records.
    pub pacing_delay: Duration,
    /// Credential for the nearby-places service. `None` means transit is estimated.
    pub places_api_key: Option<String>,
    /// Log a progress checkpoint every N records (0 disables it).
    pub progress_every: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            geocode_timeout: Duration::from_secs(10),
            places_timeout: Duration::from_secs(10),
            pacing_delay: Duration::from_secs(2),
            places_api_key: None,
            progress_every: 10,
        }
    }
}

impl EnrichConfig {
    /// Blank credentials count as absent.
    pub fn with_places_api_key(mut self, key: Option<String>) -> Self {
        self.places_api_key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }
}
