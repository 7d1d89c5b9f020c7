//! Authentication error types.

use thiserror::Error;

use hoodie_store_core::{EmailError, StorageError, ValidationError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field is empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The operation needs a signed-in session.
    #[error("not signed in")]
    NotAuthenticated,

    /// Credential store error.
    #[error("credential store error: {0}")]
    Storage(#[from] StorageError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
