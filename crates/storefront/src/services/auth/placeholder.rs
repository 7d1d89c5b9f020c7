//! Demo authenticator with a hard-wired admin pair.

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use hoodie_store_core::{Role, Session, UserId, name_from_email};

use super::{AuthError, Authenticator};

/// Default admin email of the demo store.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hoodies.com";

/// Default admin password of the demo store.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Accepts any non-empty credentials.
///
/// The configured admin pair signs in as admin; every other pair signs in as
/// a customer named after the local part of the email. Customer IDs are
/// derived from the email so repeat logins own the same orders.
pub struct PlaceholderAuthenticator {
    admin_email: String,
    admin_password: SecretString,
}

impl PlaceholderAuthenticator {
    /// Identifier of the admin session.
    pub const ADMIN_USER_ID: &str = "1";

    /// Create an authenticator recognising the given admin pair.
    #[must_use]
    pub fn new(admin_email: impl Into<String>, admin_password: SecretString) -> Self {
        Self {
            admin_email: admin_email.into(),
            admin_password,
        }
    }
}

impl Default for PlaceholderAuthenticator {
    fn default() -> Self {
        Self::new(
            DEFAULT_ADMIN_EMAIL,
            SecretString::from(DEFAULT_ADMIN_PASSWORD.to_owned()),
        )
    }
}

impl std::fmt::Debug for PlaceholderAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderAuthenticator")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .finish()
    }
}

impl Authenticator for PlaceholderAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email == self.admin_email && password == self.admin_password.expose_secret() {
            return Ok(Session::new(
                UserId::new(Self::ADMIN_USER_ID),
                email,
                "Admin",
                Role::Admin,
            ));
        }

        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes());
        Ok(Session::new(
            UserId::new(id.to_string()),
            email,
            name_from_email(email),
            Role::Customer,
        ))
    }

    fn register(&self, email: &str, _password: &str, name: &str) -> Result<Session, AuthError> {
        Ok(Session::new(UserId::generate(), email, name, Role::Customer))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_needs_both_parts() {
        let auth = PlaceholderAuthenticator::default();
        assert!(auth.login("admin@hoodies.com", "admin123").unwrap().is_admin());
        assert!(!auth.login("admin@hoodies.com", "wrong").unwrap().is_admin());
        assert!(!auth.login("other@hoodies.com", "admin123").unwrap().is_admin());
    }

    #[test]
    fn test_customer_id_is_stable_per_email() {
        let auth = PlaceholderAuthenticator::default();
        let first = auth.login("x@y.com", "a").unwrap();
        let second = auth.login("x@y.com", "b").unwrap();
        let other = auth.login("z@y.com", "a").unwrap();
        assert_eq!(first.id(), second.id());
        assert_ne!(first.id(), other.id());
    }

    #[test]
    fn test_custom_admin_pair() {
        let auth =
            PlaceholderAuthenticator::new("boss@shop.ma", SecretString::from("s3cret".to_owned()));
        assert!(auth.login("boss@shop.ma", "s3cret").unwrap().is_admin());
        assert!(!auth.login("admin@hoodies.com", "admin123").unwrap().is_admin());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", PlaceholderAuthenticator::default());
        assert!(!debug.contains("admin123"));
    }
}
