//! Signed-in session capability.
//!
//! A `CatalogController` cannot be built without a `Session`. Hosts call
//! [`require_session`] first and redirect to sign-in when it fails.

use thiserror::Error;

use catalogx_core::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,
}

/// Proof that a user is signed in, plus the credential for the product store.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    token: String,
}

impl Session {
    pub fn new(user_id: UserId, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Precondition for building a controller.
pub fn require_session(session: Option<Session>) -> Result<Session, SessionError> {
    match session {
        Some(session) if !session.token.trim().is_empty() => Ok(session),
        _ => Err(SessionError::NotSignedIn),
    }
}
