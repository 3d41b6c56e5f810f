// Timeline aggregation: fetch both availability feeds, order them and derive
// the freshness timestamp shown next to them

pub mod cache;
pub mod sort;

pub use cache::TimelineCache;
pub use sort::{compare_entries, latest_update, parse_timestamp, sort_entries};

use crate::config::{FeedsConfig, Settings};
use crate::error::Result;
use crate::feed::{FeatureEntry, Fetcher};
use futures::future::try_join;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Both feeds, sorted, plus the most recent update across them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
    pub widely_available: Vec<FeatureEntry>,
    pub newly_available: Vec<FeatureEntry>,
    /// RFC 3339 timestamp, or empty when no entry carries a usable date
    pub last_updated: String,
}

impl TimelineData {
    /// Sort both sequences and compute `last_updated`
    pub fn new(
        mut widely_available: Vec<FeatureEntry>,
        mut newly_available: Vec<FeatureEntry>,
    ) -> Self {
        sort_entries(&mut widely_available);
        sort_entries(&mut newly_available);

        let last_updated = latest_update(widely_available.iter().chain(newly_available.iter()));

        Self {
            widely_available,
            newly_available,
            last_updated,
        }
    }
}

/// Builds the timeline on first request and serves it from the cache after
pub struct Timeline {
    fetcher: Fetcher,
    feeds: FeedsConfig,
    cache: Arc<TimelineCache>,
}

impl Timeline {
    pub fn new(fetcher: Fetcher, feeds: FeedsConfig, cache: Arc<TimelineCache>) -> Self {
        Self {
            fetcher,
            feeds,
            cache,
        }
    }

    pub fn from_settings(settings: &Settings, cache: Arc<TimelineCache>) -> Result<Self> {
        let fetcher = Fetcher::new(&settings.fetcher)?;
        Ok(Self::new(fetcher, settings.feeds.clone(), cache))
    }

    /// Cached timeline, building it first if this is the first request
    pub async fn get_timeline_data(&self) -> Result<Arc<TimelineData>> {
        self.cache.get_or_try_build(move || self.build()).await
    }

    async fn build(&self) -> Result<TimelineData> {
        info!(
            "Building timeline from {} and {}",
            self.feeds.widely_available_url, self.feeds.newly_available_url
        );

        let (widely, newly) = try_join(
            self.fetcher.fetch_entries(&self.feeds.widely_available_url),
            self.fetcher.fetch_entries(&self.feeds.newly_available_url),
        )
        .await?;

        let data = TimelineData::new(widely, newly);

        info!(
            "Timeline built: {} widely available, {} newly available, last updated {:?}",
            data.widely_available.len(),
            data.newly_available.len(),
            data.last_updated
        );

        Ok(data)
    }
}
