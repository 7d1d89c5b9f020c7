//! A store whose writes always fail, for exercising fire-and-forget
//! persistence.

use std::io;

use hoodie_store_core::{KeyValueStore, StorageError};

use super::MemoryStore;

/// Reads go to an inner [`MemoryStore`]; `set` and `remove` always fail.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
}

impl FailingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value directly, bypassing the failing write path.
    pub fn seed(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

fn disk_full(key: &str) -> StorageError {
    StorageError::Io {
        key: key.to_owned(),
        source: io::Error::other("disk full"),
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(disk_full(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(disk_full(key))
    }
}
