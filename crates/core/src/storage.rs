//! Key-value persistence contract.
//!
//! Services receive a store through `Arc<dyn KeyValueStore>` and write their
//! whole state under one key after each mutation. Values are JSON text.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys used by the storefront services.
pub mod keys {
    /// The signed-in session.
    pub const USER: &str = "user";

    /// Cart line items.
    pub const CART: &str = "cart";

    /// Every placed order.
    pub const ORDERS: &str = "orders";

    /// Password credential records.
    pub const CREDENTIALS: &str = "credentials";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value is not valid JSON for the expected type.
    #[error("malformed value for key {key}: {source}")]
    Malformed {
        /// Key being decoded.
        key: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("could not encode value for key {key}: {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A lock guarding the backend was poisoned.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued store (browser local storage or an
/// embedded equivalent).
pub trait KeyValueStore: fmt::Debug + Send + Sync {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the stored text does not decode.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}
