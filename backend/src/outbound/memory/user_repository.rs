//! In-memory user store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserId, Username};

/// User store holding records in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_by(
        &self,
        predicate: impl Fn(&User) -> bool + Send,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| predicate(user)).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add_user(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }

    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find_by(|user| user.username() == username).await
    }

    async fn get_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find_by(|user| user.email() == email).await
    }

    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.find_by(|user| user.id() == id).await
    }
}
