//! Persisted session store.
//!
//! Holds the authenticated-identity singleton and commits it to the
//! `auth-storage` slot on every change. There is no real credential check:
//! any non-empty email/password pair logs in, matching the demo API's mock
//! authentication. Validation failures are a `false` return, never an error.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::session::{Identity, Session};
use crate::storage::slot::JsonSlot;

const SLOT_NAME: &str = "auth-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionSnapshot {
    version: u32,
    #[serde(default)]
    session: Session,
}

/// Store for the session singleton.
pub struct SessionStore {
    slot: JsonSlot,
    session: Session,
}

impl SessionStore {
    /// Opens the store and hydrates the session from its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be opened or holds a corrupt
    /// snapshot.
    pub fn open(data_dir: impl AsRef<std::path::Path>) -> Result<Self> {
        let slot = JsonSlot::open(data_dir, SLOT_NAME)?;
        let snapshot: SessionSnapshot = slot.read()?.unwrap_or_default();

        tracing::debug!(
            authenticated = snapshot.session.authenticated,
            "session store hydrated"
        );

        Ok(Self {
            slot,
            session: snapshot.session,
        })
    }

    /// The current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True when a login has succeeded and not been logged out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    /// Attempts a login.
    ///
    /// Succeeds iff both email and password are non-empty; on success the
    /// display name is the local part of the email and the session is
    /// persisted. On validation failure nothing changes and `false` is
    /// returned; the caller surfaces an inline message.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the new session fails.
    pub fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let _span = tracing::debug_span!("session_login", email = %email).entered();

        if email.is_empty() || password.is_empty() {
            tracing::debug!("login rejected, empty email or password");
            return Ok(false);
        }

        self.session = Session {
            user: Some(Identity::from_email(email)),
            authenticated: true,
            logged_in_at: Some(chrono::Utc::now().timestamp()),
        };
        self.persist()?;

        tracing::debug!("login succeeded");
        Ok(true)
    }

    /// Clears the session unconditionally and persists.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting fails.
    pub fn logout(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_logout").entered();
        self.session = Session::default();
        self.persist()
    }

    /// Re-persists the current session unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn flush(&self) -> Result<()> {
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.slot.write(&SessionSnapshot {
            version: 1,
            session: self.session.clone(),
        })
    }
}
