//! Secret service.
//!
//! Reads the default provider credential from `secret.json`, falling back
//! to the `GEMINI_API_KEY` environment variable.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;
use wisdom_core::config::SecretConfig;
use wisdom_core::error::Result;

use crate::paths::WisdomPaths;
use crate::storage::AtomicFile;

/// Environment variable consulted when `secret.json` has no key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Loads and caches [`SecretConfig`].
#[derive(Clone)]
pub struct SecretService {
    path: PathBuf,
    env_fallback: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretService {
    /// Uses the secret file from `paths`, creating the template if missing.
    pub fn new(paths: &WisdomPaths) -> Result<Self> {
        let path = paths.ensure_secret_file()?;
        Ok(Self::at(path).with_env_fallback(std::env::var(GEMINI_API_KEY_ENV).ok()))
    }

    /// Service reading a specific file, without environment fallback.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            env_fallback: None,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_env_fallback(mut self, value: Option<String>) -> Self {
        self.env_fallback = value.filter(|v| !v.trim().is_empty());
        self
    }

    /// Loads the secrets, caching them after the first read.
    ///
    /// A missing or unreadable file yields an empty config.
    pub fn load_secrets(&self) -> SecretConfig {
        if let Some(cached) = self
            .secrets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = match AtomicFile::new(self.path.clone()).read() {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "invalid secret file, ignoring it");
                SecretConfig::default()
            }),
            Ok(None) => SecretConfig::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read secret file");
                SecretConfig::default()
            }
        };

        *self.secrets.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        loaded
    }

    /// The configured default credential, if any.
    pub fn default_credential(&self) -> Option<String> {
        self.load_secrets()
            .default_credential()
            .map(str::to_string)
            .or_else(|| self.env_fallback.as_ref().map(|v| v.trim().to_string()))
    }

    /// Model override from `secret.json`, if set.
    pub fn model_override(&self) -> Option<String> {
        self.load_secrets()
            .gemini
            .and_then(|g| g.model_name)
            .filter(|m| !m.trim().is_empty())
    }
}
