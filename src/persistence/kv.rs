use super::files::{atomic_write, read_file, remove_file};
use crate::error::{PauseError, PauseResult, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

/// Logical key holding the salary configuration
pub const CONFIG_KEY: &str = "config";
/// Logical key holding the in-flight break, if any
pub const ACTIVE_PAUSE_KEY: &str = "activePause";
/// Logical key holding the newest-first history log
pub const PAUSES_KEY: &str = "pauses";

/// Durable string-keyed, string-valued storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so only plain identifiers are accepted
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Backend(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(read_file(self.path_for(key)?)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(atomic_write(self.path_for(key)?, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Ok(remove_file(self.path_for(key)?)?)
    }
}

/// Read and decode a JSON document; a missing key is `Ok(None)`
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> PauseResult<Option<T>> {
    let raw = store.get(key).map_err(|e| PauseError::read(key, e))?;
    match raw {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| PauseError::read(key, e)),
    }
}

/// Encode and write a JSON document
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> PauseResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| PauseError::write(key, e))?;
    store.set(key, &json).map_err(|e| PauseError::write(key, e))
}

#[cfg(test)]
pub use memory::MemoryStore;
