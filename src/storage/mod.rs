//! Persistent key-value storage
//!
//! Holds the signed-in session (`token`, `user`) and cached API responses
//! (`<url>`, `<url>_timestamp`) side by side. Every operation is atomic on
//! its own; read-then-write sequences are not, so concurrent writers to the
//! same key resolve as last-writer-wins.

pub mod sqlite;

#[cfg(test)]
use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::Mutex;

use crate::error::StorageError;

pub use sqlite::SqliteStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// String-keyed, string-valued persistent store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys currently stored, in ascending order
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
