use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_WIDELY_AVAILABLE_URL: &str =
    "https://web-platform-dx.github.io/web-features-explorer/widely-available.xml";
pub const DEFAULT_NEWLY_AVAILABLE_URL: &str =
    "https://web-platform-dx.github.io/web-features-explorer/newly-available.xml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub feeds: FeedsConfig,
    pub fetcher: FetcherConfig,
}

/// Locations of the two availability feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    pub widely_available_url: String,
    pub newly_available_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size: usize,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            widely_available_url: DEFAULT_WIDELY_AVAILABLE_URL.to_string(),
            newly_available_url: DEFAULT_NEWLY_AVAILABLE_URL.to_string(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("baseline-timeline/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
            max_feed_size: 5_242_880,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = FetcherConfig::default();

        let widely_available_url = std::env::var("WIDELY_AVAILABLE_FEED_URL")
            .unwrap_or_else(|_| DEFAULT_WIDELY_AVAILABLE_URL.to_string());

        let newly_available_url = std::env::var("NEWLY_AVAILABLE_FEED_URL")
            .unwrap_or_else(|_| DEFAULT_NEWLY_AVAILABLE_URL.to_string());

        let user_agent = std::env::var("FEED_USER_AGENT").unwrap_or(defaults.user_agent);

        let timeout_seconds = std::env::var("FEED_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| defaults.timeout_seconds.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FEED_TIMEOUT_SECONDS value".to_string()))?;

        let max_feed_size = std::env::var("MAX_FEED_SIZE")
            .unwrap_or_else(|_| defaults.max_feed_size.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_FEED_SIZE value".to_string()))?;

        Ok(Settings {
            feeds: FeedsConfig {
                widely_available_url,
                newly_available_url,
            },
            fetcher: FetcherConfig {
                user_agent,
                timeout_seconds,
                max_feed_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_feed_url(&self.feeds.widely_available_url)?;
        validate_feed_url(&self.feeds.newly_available_url)?;

        if self.fetcher.timeout_seconds == 0 {
            return Err(Error::Config("Timeout must be non-zero".to_string()));
        }

        if self.fetcher.max_feed_size == 0 {
            return Err(Error::Config("Max feed size must be non-zero".to_string()));
        }

        Ok(())
    }
}

fn validate_feed_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "Unsupported scheme '{scheme}' in feed URL {raw}"
        ))),
    }
}
