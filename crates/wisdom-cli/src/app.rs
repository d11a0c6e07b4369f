//! Wiring of stores and services for one CLI invocation.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use wisdom_application::{ContentDeliveryCoordinator, ContentFetcher};
use wisdom_core::Day;
use wisdom_core::config::WisdomConfig;
use wisdom_core::credential::resolve_credential;
use wisdom_core::storage::KeyValueStore;
use wisdom_infrastructure::{
    ContentCache, FileKeyValueStore, GeminiProvider, ProgressStore, SecretService, WisdomPaths,
};

pub struct App {
    pub config: WisdomConfig,
    pub secrets: SecretService,
    pub progress: Arc<ProgressStore>,
    pub cache: Arc<ContentCache>,
    pub delivery: ContentDeliveryCoordinator,
}

impl App {
    pub fn bootstrap(paths: &WisdomPaths, config: WisdomConfig) -> Result<Self> {
        let store_dir = match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => paths.store_dir()?,
        };
        let store: Arc<dyn KeyValueStore> = Arc::new(
            FileKeyValueStore::open(store_dir.clone())
                .with_context(|| format!("failed to open store at {}", store_dir.display()))?,
        );
        debug!(store = %store_dir.display(), "store opened");

        let secrets = SecretService::new(paths).context("failed to load secrets")?;

        let mut provider = GeminiProvider::new(&config.provider);
        if let Some(model) = secrets.model_override() {
            provider = provider.with_model(model);
        }
        let fetcher = ContentFetcher::new(Arc::new(provider)).with_timeout(config.provider.timeout());

        let cache = Arc::new(ContentCache::new(Arc::clone(&store)));
        let delivery = ContentDeliveryCoordinator::new(Arc::clone(&cache), fetcher);
        let progress = Arc::new(ProgressStore::new(store));

        Ok(Self {
            config,
            secrets,
            progress,
            cache,
            delivery,
        })
    }

    /// The credential to fetch with: the user's own, else the configured default.
    pub fn credential(&self) -> Option<String> {
        let state = self.progress.load();
        let default = self.secrets.default_credential();
        resolve_credential(state.custom_credential.as_deref(), default.as_deref())
    }

    /// `day` if given, otherwise the reader's current day.
    pub fn day_or_current(&self, day: Option<i64>) -> Result<Day> {
        match day {
            Some(n) => Ok(Day::new(n)?),
            None => Ok(self.progress.load().current_day),
        }
    }
}
