//! Unified error handling.
//!
//! Provides a unified `AppError` type for the [`Storefront`](crate::state::Storefront)
//! facade. Service-level errors convert into it with `?`.

use thiserror::Error;

use hoodie_store_core::{CurrencyMismatch, OrderError, OrderId, PermissionError, StorageError};

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted state could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog lookup or edit failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A price in another currency was added to the cart.
    #[error("Currency error: {0}")]
    Currency(#[from] CurrencyMismatch),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The operation needs a feature the current configuration disables.
    #[error("Unsupported: {0}")]
    Unsupported(&'static str),
}

impl From<PermissionError> for AppError {
    fn from(err: PermissionError) -> Self {
        Self::Order(OrderError::Permission(err))
    }
}

impl AppError {
    /// An order lookup miss.
    #[must_use]
    pub const fn order_not_found(order_id: OrderId) -> Self {
        Self::Order(OrderError::NotFound(order_id))
    }

    /// Whether the error is a role check failure, wherever it came from.
    #[must_use]
    pub const fn is_permission(&self) -> bool {
        matches!(
            self,
            Self::Order(OrderError::Permission(_)) | Self::Catalog(CatalogError::Permission(_))
        )
    }

    /// Whether the error is a missing order or product.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Order(OrderError::NotFound(_)) | Self::Catalog(CatalogError::NotFound(_))
        )
    }
}
