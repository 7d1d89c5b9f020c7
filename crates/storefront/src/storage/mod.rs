//! Storage backends for the [`KeyValueStore`] contract.
//!
//! - [`MemoryStore`] - process-local map, used by tests and throwaway sessions
//! - [`FileStore`] - one JSON file per key under a data directory
//!
//! [`KeyValueStore`]: hoodie_store_core::KeyValueStore

#[cfg(test)]
pub(crate) mod failing;
mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use hoodie_store_core::StorageError;

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("orders").is_ok());
        assert!(validate_key("cart_v2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }
}
