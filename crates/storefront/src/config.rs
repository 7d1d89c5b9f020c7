//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HOODIE_DATA_DIR` - Directory holding persisted state (default: `.hoodie-store`)
//! - `HOODIE_STORE_NAME` - Store name used in customer messages (default: `HoodieStore`)
//! - `HOODIE_CURRENCY` - Currency every catalog price is in (default: `MAD`)
//! - `HOODIE_AUTH_MODE` - `placeholder` or `password` (default: `placeholder`)
//! - `HOODIE_ADMIN_EMAIL` - Admin email in placeholder mode (default: `admin@hoodies.com`)
//! - `HOODIE_ADMIN_PASSWORD` - Admin password in placeholder mode (default: `admin123`)
//! - `HOODIE_ORDER_TRANSITIONS` - `permissive` or `monotonic` (default: `permissive`)
//! - `HOODIE_CATALOG_PATH` - JSON product list replacing the built-in catalog

use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use hoodie_store_core::{CurrencyCode, TransitionPolicy};

use crate::services::auth::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How credentials are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Fixed admin pair, any other non-empty pair is a customer.
    #[default]
    Placeholder,
    /// Argon2id hashes kept in the data directory.
    Password,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placeholder" => Ok(Self::Placeholder),
            "password" => Ok(Self::Password),
            _ => Err(format!("expected placeholder or password, got {s}")),
        }
    }
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StoreConfig {
    /// Directory holding persisted state
    pub data_dir: PathBuf,
    /// Store name shown to customers
    pub store_name: String,
    /// Currency the catalog is priced in
    pub currency: CurrencyCode,
    /// Credential checking mode
    pub auth_mode: AuthMode,
    /// Placeholder admin email
    pub admin_email: String,
    /// Placeholder admin password
    pub admin_password: SecretString,
    /// Order status transition policy
    pub order_transitions: TransitionPolicy,
    /// Catalog file replacing the built-in products
    pub catalog_path: Option<PathBuf>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .field("store_name", &self.store_name)
            .field("currency", &self.currency)
            .field("auth_mode", &self.auth_mode)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("order_transitions", &self.order_transitions)
            .field("catalog_path", &self.catalog_path)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".hoodie-store"),
            store_name: "HoodieStore".to_string(),
            currency: CurrencyCode::default(),
            auth_mode: AuthMode::default(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD.to_owned()),
            order_transitions: TransitionPolicy::default(),
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an unrecognised value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            data_dir: get("HOODIE_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            store_name: get("HOODIE_STORE_NAME").unwrap_or(defaults.store_name),
            currency: parse_or("HOODIE_CURRENCY", get("HOODIE_CURRENCY"), defaults.currency)?,
            auth_mode: parse_or("HOODIE_AUTH_MODE", get("HOODIE_AUTH_MODE"), defaults.auth_mode)?,
            admin_email: get("HOODIE_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: get("HOODIE_ADMIN_PASSWORD")
                .map_or(defaults.admin_password, SecretString::from),
            order_transitions: parse_or(
                "HOODIE_ORDER_TRANSITIONS",
                get("HOODIE_ORDER_TRANSITIONS"),
                defaults.order_transitions,
            )?,
            catalog_path: get("HOODIE_CATALOG_PATH").map(PathBuf::from),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".hoodie-store"));
        assert_eq!(config.store_name, "HoodieStore");
        assert_eq!(config.currency, CurrencyCode::MAD);
        assert_eq!(config.auth_mode, AuthMode::Placeholder);
        assert_eq!(config.admin_email, "admin@hoodies.com");
        assert_eq!(config.admin_password.expose_secret(), "admin123");
        assert_eq!(config.order_transitions, TransitionPolicy::Permissive);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HOODIE_DATA_DIR", "/var/lib/hoodies"),
            ("HOODIE_CURRENCY", "EUR"),
            ("HOODIE_AUTH_MODE", "password"),
            ("HOODIE_ORDER_TRANSITIONS", "monotonic"),
            ("HOODIE_CATALOG_PATH", "catalog.json"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/hoodies"));
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.auth_mode, AuthMode::Password);
        assert_eq!(config.order_transitions, TransitionPolicy::Monotonic);
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("HOODIE_STORE_NAME", "  "), ("HOODIE_AUTH_MODE", "")]).unwrap();
        assert_eq!(config.store_name, "HoodieStore");
        assert_eq!(config.auth_mode, AuthMode::Placeholder);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("HOODIE_AUTH_MODE", "oauth")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "HOODIE_AUTH_MODE"));
        assert!(load(&[("HOODIE_CURRENCY", "XYZ")]).is_err());
        assert!(load(&[("HOODIE_ORDER_TRANSITIONS", "sideways")]).is_err());
    }

    #[test]
    fn test_debug_redacts_admin_password() {
        let config = load(&[("HOODIE_ADMIN_PASSWORD", "hunter2hunter2")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
