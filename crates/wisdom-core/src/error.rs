//! Error types for Wisdom Journey.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the local side of the application.
///
/// Fetch-path failures that the reader must see have their own classified
/// type, [`crate::content::FetchError`]. Everything here is either a
/// validation failure on user input or a storage/config problem that callers
/// are expected to log and recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WisdomError {
    /// A day outside the 1..=31 curriculum.
    #[error("Invalid day: {0} (expected 1..=31)")]
    InvalidDay(i64),

    /// A reminder time that is not a 24-hour `HH:MM` string.
    #[error("Invalid notification time: '{0}' (expected HH:MM)")]
    InvalidTime(String),

    /// Rejected user input (blank name, bad key, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Key-value store failure (quota, lock, unknown key layout)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WisdomError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error came from validating user-supplied values.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDay(_) | Self::InvalidTime(_) | Self::InvalidInput(_)
        )
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for WisdomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for WisdomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for WisdomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for WisdomError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, WisdomError>`.
pub type Result<T> = std::result::Result<T, WisdomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: WisdomError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: WisdomError = parse.unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_validation_predicate() {
        assert!(WisdomError::InvalidDay(0).is_validation());
        assert!(WisdomError::InvalidTime("25:00".into()).is_validation());
        assert!(!WisdomError::storage("full").is_validation());
    }
}
