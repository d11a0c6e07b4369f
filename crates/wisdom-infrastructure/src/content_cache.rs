//! Schema-versioned cache of daily content.
//!
//! Entries are persisted in the key-value store under
//! `wisdom_day_{day}_{schema_version}`. Changing the schema version makes
//! every older entry unreachable without touching it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};
use wisdom_core::Day;
use wisdom_core::content::DailyContent;
use wisdom_core::error::Result;
use wisdom_core::storage::KeyValueStore;

/// Schema tag of the current `DailyContent` layout.
pub const CONTENT_SCHEMA_VERSION: &str = "v3_ai";

const KEY_PREFIX: &str = "wisdom_day_";

/// Read-through cache for [`DailyContent`].
///
/// Lookups check an in-memory map first, so repeated reads of a day hand
/// out the same `Arc`. The key-value store is the durable layer behind it.
pub struct ContentCache {
    store: Arc<dyn KeyValueStore>,
    schema_version: String,
    memory: RwLock<HashMap<Day, Arc<DailyContent>>>,
}

impl ContentCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_schema_version(store, CONTENT_SCHEMA_VERSION)
    }

    pub fn with_schema_version(store: Arc<dyn KeyValueStore>, version: impl Into<String>) -> Self {
        Self {
            store,
            schema_version: version.into(),
            memory: RwLock::new(HashMap::new()),
        }
    }

    /// Store key for `day` under the current schema version.
    pub fn key_for(&self, day: Day) -> String {
        format!("{KEY_PREFIX}{day}_{}", self.schema_version)
    }

    /// Returns the cached content for `day`, if any.
    ///
    /// A stored blob that no longer parses (or belongs to another day) is
    /// deleted and reported as a miss.
    pub fn get(&self, day: Day) -> Option<Arc<DailyContent>> {
        if let Some(hit) = self
            .memory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&day)
        {
            debug!(%day, "content cache hit (memory)");
            return Some(Arc::clone(hit));
        }

        let key = self.key_for(day);
        let blob = match self.store.get(&key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(%day, "content cache miss");
                return None;
            }
            Err(e) => {
                warn!(%day, error = %e, "content cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<DailyContent>(&blob) {
            Ok(content) if content.day == day => {
                debug!(%day, "content cache hit (store)");
                let content = Arc::new(content);
                self.memory
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(day, Arc::clone(&content));
                Some(content)
            }
            Ok(content) => {
                warn!(%day, stored_day = %content.day, "cached content belongs to another day, purging");
                self.purge(&key);
                None
            }
            Err(e) => {
                warn!(%day, error = %e, "corrupt content cache entry, purging");
                self.purge(&key);
                None
            }
        }
    }

    /// Caches `content` under its day.
    ///
    /// The in-memory entry is always recorded. An `Err` means only that the
    /// durable write failed; the caller can still use the content.
    pub fn put(&self, content: Arc<DailyContent>) -> Result<()> {
        let day = content.day;
        self.memory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(day, Arc::clone(&content));

        let blob = serde_json::to_string(content.as_ref())?;
        self.store.set(&self.key_for(day), &blob)
    }

    /// Drops the entry for `day` so the next request refetches it.
    pub fn invalidate(&self, day: Day) -> Result<()> {
        self.memory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&day);
        self.store.remove(&self.key_for(day))
    }

    /// Removes every cached day, including entries of older schema versions.
    ///
    /// Returns how many stored entries were deleted.
    pub fn clear(&self) -> Result<usize> {
        self.memory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let mut removed = 0;
        for key in self.store.keys()? {
            if key.starts_with(KEY_PREFIX) {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn purge(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "failed to purge content cache entry");
        }
    }
}
