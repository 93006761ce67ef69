//! Port abstraction for user storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The backing store could not be reached.
    #[error("user repository unavailable: {message}")]
    Unavailable { message: String },
}

impl UserPersistenceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Driven port for the user store.
///
/// `add_user` does not check uniqueness; registration looks up the username
/// and email first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user record.
    async fn add_user(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn get_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
