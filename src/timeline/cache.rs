use super::TimelineData;
use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Single-slot store for the built timeline.
///
/// The slot is filled at most once. Concurrent callers that arrive while a
/// build is in flight wait for it instead of starting their own. A failed
/// build leaves the slot empty, so the next caller builds again.
#[derive(Debug, Default)]
pub struct TimelineCache {
    slot: OnceCell<Arc<TimelineData>>,
}

impl TimelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached timeline, without triggering a build
    pub fn get(&self) -> Option<Arc<TimelineData>> {
        self.slot.get().cloned()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.initialized()
    }

    /// Return the cached timeline, running `build` if the slot is empty
    pub async fn get_or_try_build<F, Fut>(&self, build: F) -> Result<Arc<TimelineData>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TimelineData>>,
    {
        self.slot
            .get_or_try_init(|| async { build().await.map(Arc::new) })
            .await
            .cloned()
    }
}
