//! Unified path management for wisdom configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/wisdom/            # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # Default provider credential
//! └── logs/                    # Application logs
//!     └── wisdom.log.YYYY-MM-DD
//!
//! ~/.local/share/wisdom/       # Data directory
//! └── store/                   # Key-value store (one JSON file per key)
//! ```
//!
//! Passing a base directory to [`WisdomPaths::new`] roots both trees under
//! it, which is how tests and `--home` keep away from the real profile.

use std::path::{Path, PathBuf};

use wisdom_core::config::{GeminiSecret, SecretConfig};

const APP_DIR: &str = "wisdom";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for wisdom_core::WisdomError {
    fn from(err: PathError) -> Self {
        wisdom_core::WisdomError::config(err.to_string())
    }
}

/// Resolves every file location used by the application.
#[derive(Debug, Clone)]
pub struct WisdomPaths {
    base: Option<PathBuf>,
}

impl WisdomPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the wisdom configuration directory (e.g. `~/.config/wisdom/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the wisdom data directory (e.g. `~/.local/share/wisdom/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Directory holding the key-value store files.
    pub fn store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("store"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// The template carries an empty Gemini key so the user only has to fill
    /// it in. On Unix the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
                model_name: Some(wisdom_core::config::DEFAULT_GEMINI_MODEL.to_string()),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template).map_err(std::io::Error::other)?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

impl Default for WisdomPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_platform_config_dir() {
        // Sandboxed CI may have no home directory at all.
        if let Ok(config_dir) = WisdomPaths::default().config_dir() {
            assert!(config_dir.ends_with("wisdom"));
        }
    }

    #[test]
    fn test_files_live_under_their_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WisdomPaths::new(Some(temp_dir.path()));

        let config_dir = paths.config_dir().unwrap();
        assert!(paths.config_file().unwrap().starts_with(&config_dir));
        assert!(paths.secret_file().unwrap().ends_with("secret.json"));
        assert!(paths.logs_dir().unwrap().starts_with(&config_dir));
        assert!(paths.store_dir().unwrap().starts_with(paths.data_dir().unwrap()));
        assert!(paths.store_dir().unwrap().starts_with(temp_dir.path()));
    }

    #[test]
    fn test_ensure_secret_file_writes_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WisdomPaths::new(Some(temp_dir.path()));

        let path = paths.ensure_secret_file().unwrap();
        let template: SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(template.default_credential(), None);

        std::fs::write(&path, r#"{"gemini":{"apiKey":"filled"}}"#).unwrap();
        paths.ensure_secret_file().unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("filled"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = WisdomPaths::new(Some(temp_dir.path()))
            .ensure_secret_file()
            .unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
