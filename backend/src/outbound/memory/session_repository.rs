//! In-memory session table.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{SessionPersistenceError, SessionRepository};
use crate::domain::{SessionToken, UserId};

/// Token to user map. Empty at start-up.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<SessionToken, UserId>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(
        &self,
        token: SessionToken,
        user: UserId,
    ) -> Result<(), SessionPersistenceError> {
        self.sessions.write().await.insert(token, user);
        Ok(())
    }

    async fn resolve(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserId>, SessionPersistenceError> {
        Ok(self.sessions.read().await.get(token).copied())
    }

    async fn remove(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserId>, SessionPersistenceError> {
        Ok(self.sessions.write().await.remove(token))
    }
}
