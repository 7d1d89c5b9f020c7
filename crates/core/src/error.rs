//! Errors shared by the order, catalog and session operations.

use thiserror::Error;

use crate::types::{CurrencyCode, Role};

/// A required field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field is present but its value is unacceptable.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A role-gated operation was invoked without the required role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} requires an admin session")]
pub struct PermissionError {
    /// The operation that was refused.
    pub action: &'static str,
}

/// Amounts in two currencies were combined.
///
/// Prices are never converted, so a cart or catalog holds one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot combine a {} price with {} prices", .found.code(), .expected.code())]
pub struct CurrencyMismatch {
    /// Currency already in use.
    pub expected: CurrencyCode,
    /// Currency of the rejected price.
    pub found: CurrencyCode,
}

impl PermissionError {
    /// Succeeds only for admin actors.
    ///
    /// # Errors
    ///
    /// Returns `PermissionError` when `actor` is absent or not an admin.
    pub fn require_admin(actor: Option<Role>, action: &'static str) -> Result<(), Self> {
        match actor {
            Some(role) if role.is_admin() => Ok(()),
            _ => Err(Self { action }),
        }
    }
}
