//! Directory-backed key-value store.

use std::fs;
use std::path::PathBuf;

use wisdom_core::error::{Result, WisdomError};
use wisdom_core::storage::{KeyValueStore, is_valid_key};

use super::atomic_file::AtomicFile;

const EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`, written atomically.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens the store, creating the directory if needed.
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        if !is_valid_key(key) {
            return Err(WisdomError::storage(format!("invalid key '{key}'")));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.{EXTENSION}"))))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file_for(key)?.read()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.file_for(key)?.write(value)?)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Ok(self.file_for(key)?.remove()?)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_key(stem) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
