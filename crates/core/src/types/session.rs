//! Session identity.

use serde::{Deserialize, Serialize};

use super::{Role, UserId};

/// The signed-in user of the current client.
///
/// Fields are read-only once built; a role change requires a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: UserId,
    email: String,
    name: String,
    role: Role,
}

impl Session {
    /// Build a session.
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    /// User identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Email the user signed in with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether this session may run admin operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Default display name for an email: everything before the first `@`.
#[must_use]
pub fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("x@y.com"), "x");
        assert_eq!(name_from_email("no-domain"), "no-domain");
        assert_eq!(name_from_email("@y.com"), "");
    }

    #[test]
    fn test_session_admin_flag() {
        let admin = Session::new(UserId::new("1"), "admin@hoodies.com", "Admin", Role::Admin);
        assert!(admin.is_admin());
        assert_eq!(admin.role(), Role::Admin);
    }
}
