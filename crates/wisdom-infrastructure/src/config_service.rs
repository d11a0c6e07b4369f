//! Configuration service.
//!
//! Loads `config.toml`, writing a default file on first run. A file that
//! fails to parse is reported and replaced by defaults for this run only;
//! the user's copy is left untouched.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};
use wisdom_core::config::WisdomConfig;
use wisdom_core::error::Result;

use crate::paths::WisdomPaths;
use crate::storage::AtomicFile;

/// Loads and caches [`WisdomConfig`].
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<WisdomConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &WisdomPaths) -> Result<Self> {
        Ok(Self::at(paths.config_file()?))
    }

    /// Service reading a specific file.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> WisdomConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = self.load_config();
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        loaded
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn load_config(&self) -> WisdomConfig {
        let file = AtomicFile::new(self.path.clone());
        match file.read() {
            Ok(Some(text)) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "invalid config file, using defaults");
                    WisdomConfig::default()
                }
            },
            Ok(None) => {
                let config = WisdomConfig::default();
                if let Err(e) = write_default(&file, &config) {
                    warn!(path = %self.path.display(), error = %e, "failed to write default config");
                } else {
                    info!(path = %self.path.display(), "created default config");
                }
                config
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read config, using defaults");
                WisdomConfig::default()
            }
        }
    }
}

fn write_default(file: &AtomicFile, config: &WisdomConfig) -> Result<()> {
    let text = toml::to_string_pretty(config)?;
    file.write(&text)?;
    Ok(())
}
