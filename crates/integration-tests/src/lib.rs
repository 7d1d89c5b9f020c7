//! Integration tests for Hoodie Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hoodie-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to order, across process restarts
//! - `order_lifecycle` - Role-gated status transitions and policies
//! - `sessions` - Placeholder and password sign-in
//! - `storage` - File-backed persistence and recovery
//!
//! Each test opens the store over a fresh temporary data directory. Calling
//! [`TestContext::reopen`] drops nothing on disk and builds a new
//! [`Storefront`], the way a second CLI invocation would.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use tempfile::TempDir;

use hoodie_store_core::CustomerInfo;
use hoodie_store_storefront::config::StoreConfig;
use hoodie_store_storefront::error::AppError;
use hoodie_store_storefront::state::Storefront;

/// A storefront over a throwaway data directory.
pub struct TestContext {
    dir: TempDir,
    config: StoreConfig,
}

impl TestContext {
    /// Default configuration in a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Self::with_config(StoreConfig::default())
    }

    /// `config` with its data directory replaced by a temporary one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn with_config(mut config: StoreConfig) -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        config.data_dir = dir.path().to_path_buf();
        Ok(Self { dir, config })
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a storefront over the data directory.
    ///
    /// # Errors
    ///
    /// Returns the storefront's error if saved state cannot be read.
    pub fn open(&self) -> Result<Storefront, AppError> {
        Storefront::open(self.config.clone())
    }

    /// Drop `store` and open a new one over the same directory.
    ///
    /// # Errors
    ///
    /// Returns the storefront's error if saved state cannot be read.
    pub fn reopen(&self, store: Storefront) -> Result<Storefront, AppError> {
        drop(store);
        self.open()
    }
}

/// Complete delivery details.
#[must_use]
pub fn customer_info() -> CustomerInfo {
    CustomerInfo {
        name: "Nadia Benali".to_string(),
        email: "nadia@example.ma".to_string(),
        phone: "+212 6 61 23 45 67".to_string(),
        address: "12 Rue Atlas".to_string(),
        city: "Rabat".to_string(),
        notes: None,
    }
}
