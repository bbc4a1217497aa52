use std::fmt;

use chrono::{DateTime, Utc};
use nutype::nutype;

use crate::macros::id;

id!(AdminSessionId);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, Hash, TryFrom, Deref, Display)
)]
pub struct AdminUsername(String);

#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(String);

impl AdminPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: AdminPassword,
}

/// Proof of a successful admin login. Admin-only operations take a
/// reference to one instead of checking credentials themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub id: AdminSessionId,
    pub username: AdminUsername,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_debug_is_redacted() {
        let credentials = AdminCredentials {
            username: "admin".into(),
            password: AdminPassword::new("hunter2"),
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn username_is_trimmed() {
        let username = AdminUsername::try_new("  admin ").unwrap();
        assert_eq!(username.to_string(), "admin");
        assert!(AdminUsername::try_new(" ").is_err());
    }
}
