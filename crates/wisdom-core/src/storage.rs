//! Persistent key-value store trait.

use crate::error::Result;

/// String-keyed blob storage backing both the progress store and the
/// content cache.
///
/// Calls are synchronous: a write has either reached the store or failed by
/// the time it returns. Keys are plain ASCII identifiers
/// (`[A-Za-z0-9_-]`); implementations may reject anything else.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists every key currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Returns true if `key` only uses characters every backend accepts.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(is_valid_key("wisdom_day_3_v3_ai"));
        assert!(is_valid_key("wisdom-user"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("a b"));
    }
}
