//! Client configuration (layered: code > env > defaults).

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how the SDK talks to the service.
///
/// # Example
/// ```no_run
/// use tacks::config::ClientConfig;
///
/// let config = ClientConfig::from_env().with_base_url("https://board.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the environment (`TACKS_API_URL`), reading `.env` if
    /// present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::new();
        if let Ok(url) = std::env::var("TACKS_API_URL") {
            config = config.with_base_url(url);
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
