//! Password authenticator backed by Argon2id hashes.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use hoodie_store_core::storage::{self, keys};
use hoodie_store_core::{Email, KeyValueStore, Role, Session, UserId};

use super::{AuthError, Authenticator};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// One stored account.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialRecord {
    user_id: UserId,
    email: Email,
    name: String,
    role: Role,
    password_hash: String,
}

impl CredentialRecord {
    fn session(&self) -> Session {
        Session::new(
            self.user_id.clone(),
            self.email.as_str(),
            &*self.name,
            self.role,
        )
    }
}

/// Verifies passwords against the `credentials` storage key.
#[derive(Debug)]
pub struct PasswordAuthenticator {
    store: Arc<dyn KeyValueStore>,
}

impl PasswordAuthenticator {
    /// Create an authenticator over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Same as [`Authenticator::register`].
    #[instrument(skip(self, password))]
    pub fn create_admin(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Session, AuthError> {
        self.create_account(email, password, name, Role::Admin)
    }

    fn records(&self) -> Result<Vec<CredentialRecord>, AuthError> {
        Ok(storage::read_json(self.store.as_ref(), keys::CREDENTIALS)?.unwrap_or_default())
    }

    fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<Session, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let mut records = self.records()?;
        if records.iter().any(|r| r.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let record = CredentialRecord {
            user_id: UserId::generate(),
            email,
            name: name.to_owned(),
            role,
            password_hash: hash_password(password)?,
        };
        let session = record.session();
        records.push(record);
        storage::write_json(self.store.as_ref(), keys::CREDENTIALS, &records)?;

        info!(user_id = %session.id(), %role, "Account created");
        Ok(session)
    }
}

impl Authenticator for PasswordAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let records = self.records()?;
        let record = records
            .iter()
            .find(|r| r.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &record.password_hash)?;
        Ok(record.session())
    }

    fn register(&self, email: &str, password: &str, name: &str) -> Result<Session, AuthError> {
        self.create_account(email, password, name, Role::Customer)
    }
}

/// Validate password requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
