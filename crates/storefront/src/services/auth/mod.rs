//! Session and identity service.
//!
//! [`SessionService`] owns the signed-in [`Session`] of the current client
//! and mirrors it to the `user` storage key. Credential checks are delegated
//! to an [`Authenticator`]:
//!
//! - [`PlaceholderAuthenticator`] reproduces the demo login, where one fixed
//!   admin pair is recognised and any other non-empty pair signs in as a
//!   customer. It verifies nothing and must not face real users.
//! - [`PasswordAuthenticator`] checks Argon2id hashes held in the
//!   `credentials` storage key.
//!
//! Roles gate admin operations but are not a security boundary.

mod error;
mod password;
mod placeholder;

pub use error::AuthError;
pub use password::PasswordAuthenticator;
pub use placeholder::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, PlaceholderAuthenticator};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use hoodie_store_core::storage::{self, keys};
use hoodie_store_core::{KeyValueStore, Role, Session, ValidationError};

/// Turns credentials into a [`Session`].
pub trait Authenticator: fmt::Debug + Send + Sync {
    /// Sign in with an email and password. Fields are already non-empty.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the pair is refused.
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create a customer account. Fields are already non-empty.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` when the account cannot be created.
    fn register(&self, email: &str, password: &str, name: &str) -> Result<Session, AuthError>;
}

/// The current client's sign-in state.
#[derive(Debug)]
pub struct SessionService {
    current: Option<Session>,
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionService {
    /// Restore the session saved under the `user` key, if any.
    ///
    /// An unreadable saved session is discarded.
    #[instrument(skip_all)]
    pub fn open(store: Arc<dyn KeyValueStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        let current = match storage::read_json::<Session>(store.as_ref(), keys::USER) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                None
            }
        };
        if let Some(session) = &current {
            debug!(user_id = %session.id(), role = %session.role(), "Restored session");
        }
        Self {
            current,
            authenticator,
            store,
        }
    }

    /// Sign in, replacing any current session.
    ///
    /// On failure the previous session, if any, is kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` when either field is empty, or the
    /// authenticator's error.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Session, AuthError> {
        require_fields(&[("email", email), ("password", password)])?;
        let session = self.authenticator.login(email, password)?;
        info!(user_id = %session.id(), role = %session.role(), "Signed in");
        Ok(self.start(session))
    }

    /// Create a customer account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` when any field is empty, or the
    /// authenticator's error.
    #[instrument(skip(self, password))]
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<&Session, AuthError> {
        require_fields(&[("email", email), ("password", password), ("name", name)])?;
        let session = self.authenticator.register(email, password, name)?;
        info!(user_id = %session.id(), "Registered");
        Ok(self.start(session))
    }

    /// Sign out. Does nothing when no one is signed in.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!(user_id = %session.id(), "Signed out");
        }
        if let Err(e) = self.store.remove(keys::USER) {
            warn!(error = %e, "Failed to remove saved session");
        }
    }

    /// The signed-in session, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The signed-in session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when no one is signed in.
    pub fn require(&self) -> Result<&Session, AuthError> {
        self.current.as_ref().ok_or(AuthError::NotAuthenticated)
    }

    /// Role of the signed-in session.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(Session::role)
    }

    /// Whether the signed-in session is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(Session::is_admin)
    }

    fn start(&mut self, session: Session) -> &Session {
        if let Err(e) = storage::write_json(self.store.as_ref(), keys::USER, &session) {
            warn!(error = %e, "Failed to persist session");
        }
        self.current.insert(session)
    }
}

fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| *field)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
