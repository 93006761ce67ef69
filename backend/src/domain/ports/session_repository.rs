//! Port for the per-caller session table.

use async_trait::async_trait;

use crate::domain::{SessionToken, UserId};

/// Errors raised by session table adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionPersistenceError {
    #[error("session store unavailable: {message}")]
    Unavailable { message: String },
}

impl SessionPersistenceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Driven port mapping session tokens to authenticated users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Record that `token` belongs to `user`.
    async fn insert(&self, token: SessionToken, user: UserId)
    -> Result<(), SessionPersistenceError>;

    /// Resolve a token to its user, if the session is live.
    async fn resolve(&self, token: &SessionToken)
    -> Result<Option<UserId>, SessionPersistenceError>;

    /// End a session, returning the user it belonged to.
    async fn remove(&self, token: &SessionToken)
    -> Result<Option<UserId>, SessionPersistenceError>;
}
