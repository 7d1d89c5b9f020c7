//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use hoodie_store_core::{KeyValueStore, StorageError};

use super::validate_key;

/// A [`KeyValueStore`] backed by a `HashMap`.
///
/// Contents disappear when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a writer panicked.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self
            .entries
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .len())
    }

    /// Whether no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Poisoned` if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len().unwrap(), 1);

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_rejects_bad_key() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.set("a/b", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
