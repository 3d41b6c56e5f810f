use super::normalize::FeatureEntry;
use super::parser::parse_feed;
use crate::config::FetcherConfig;
use crate::error::{Error, Result};
use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Content types accepted without a warning
const FEED_CONTENT_TYPES: [&str; 5] = [
    "application/atom+xml",
    "application/rss+xml",
    "application/xml",
    "text/xml",
    "text/plain",
];

/// HTTP fetcher for availability feeds. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_feed_size: usize,
}

impl Fetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size,
        })
    }

    /// Fetch a feed and return its normalized entries in document order
    pub async fn fetch_entries(&self, url: &str) -> Result<Vec<FeatureEntry>> {
        let content = self.fetch_raw(url).await?;
        let entries = parse_feed(&content)?;

        debug!("Fetched {} entries from {}", entries.len(), url);
        Ok(entries)
    }

    /// Fetch a feed body as text
    pub async fn fetch_raw(&self, url: &str) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(
                url,
                Some(status.as_u16()),
                format!("HTTP {status}"),
            ));
        }

        if let Some(ct) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let ct_lower = ct.to_lowercase();
            if !FEED_CONTENT_TYPES
                .iter()
                .any(|valid_type| ct_lower.starts_with(valid_type))
            {
                // Mislabelled feeds are still parsed
                warn!("Unexpected content type: {} for {}", ct, url);
            }
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size as u64 {
                return Err(Error::fetch(
                    url,
                    Some(status.as_u16()),
                    format!(
                        "Feed size {} exceeds maximum {}",
                        content_length, self.max_feed_size
                    ),
                ));
            }
        }

        self.read_with_limit(url, response).await
    }

    async fn read_with_limit(&self, url: &str, response: Response) -> Result<String> {
        let status = Some(response.status().as_u16());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(url, status, e.to_string()))?;

        if bytes.len() > self.max_feed_size {
            return Err(Error::fetch(
                url,
                status,
                format!(
                    "Feed size {} exceeds maximum {}",
                    bytes.len(),
                    self.max_feed_size
                ),
            ));
        }

        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::FeedParse(format!("Invalid UTF-8 in response: {e}")))
    }
}
