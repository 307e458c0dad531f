//! Session and identity domain types.
//!
//! A session is the authenticated-identity singleton for the running client:
//! at most one exists, it is created on successful login, destroyed on
//! logout, and persisted across restarts.

use serde::{Deserialize, Serialize};

/// The identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    /// Display name, derived from the local part of the email address.
    pub name: String,
}

impl Identity {
    /// Builds an identity from a login email.
    ///
    /// The display name is the substring of the email before `@`; an email
    /// without `@` is used verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use opsdeck::domain::Identity;
    ///
    /// let identity = Identity::from_email("john.doe@example.com");
    /// assert_eq!(identity.name, "john.doe");
    /// ```
    #[must_use]
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            id: "1".to_string(),
            email: email.to_string(),
            name,
        }
    }
}

/// The session singleton.
///
/// `user` is `Some` exactly when `authenticated` is true; both fields exist
/// separately to mirror the persisted snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub authenticated: bool,
    /// Unix timestamp of the login that created this session, if any.
    #[serde(default)]
    pub logged_in_at: Option<i64>,
}
