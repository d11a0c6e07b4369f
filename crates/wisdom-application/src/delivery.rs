//! Cache-first content delivery.

use std::sync::Arc;

use tracing::{debug, warn};
use wisdom_core::Day;
use wisdom_core::content::{DailyContent, FetchError};
use wisdom_infrastructure::ContentCache;

use crate::content_fetcher::ContentFetcher;

/// Serves a day's content from the cache, fetching and storing it on a miss.
///
/// Failed fetches are returned as-is and never cached, so the next call for
/// the same day is a fresh attempt. Concurrent requests for different days
/// run independently.
pub struct ContentDeliveryCoordinator {
    cache: Arc<ContentCache>,
    fetcher: ContentFetcher,
}

impl ContentDeliveryCoordinator {
    pub fn new(cache: Arc<ContentCache>, fetcher: ContentFetcher) -> Self {
        Self { cache, fetcher }
    }

    /// Returns the content for `day`.
    ///
    /// `credential` is only consulted on a cache miss.
    pub async fn get_day(
        &self,
        day: Day,
        credential: Option<&str>,
    ) -> Result<Arc<DailyContent>, FetchError> {
        if let Some(hit) = self.cache.get(day) {
            return Ok(hit);
        }

        let content = Arc::new(self.fetcher.fetch(day, credential).await?);
        match self.cache.put(Arc::clone(&content)) {
            Ok(()) => debug!(%day, "daily content cached"),
            Err(e) => warn!(%day, error = %e, "failed to persist daily content"),
        }
        Ok(content)
    }
}
