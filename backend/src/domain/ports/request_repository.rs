//! Port for request storage.

use async_trait::async_trait;

use crate::domain::{Request, RequestDraft, RequestId, RequestLookup, UserId};

/// Errors raised by request repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestPersistenceError {
    /// The backing store could not be reached.
    #[error("request repository unavailable: {message}")]
    Unavailable { message: String },
    /// A write referred to a request that is no longer stored.
    #[error("request {id} is no longer stored")]
    Missing { id: RequestId },
}

impl RequestPersistenceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn missing(id: RequestId) -> Self {
        Self::Missing { id }
    }
}

/// Driven port for the ordered request store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Append a request owned by `owner`, assigning the next id.
    async fn add_request(
        &self,
        owner: &UserId,
        draft: RequestDraft,
    ) -> Result<Request, RequestPersistenceError>;

    /// All requests owned by `owner`, in insertion order.
    async fn get_user_requests(&self, owner: &UserId)
    -> Result<Vec<Request>, RequestPersistenceError>;

    /// Look `id` up on behalf of `owner`.
    async fn find(
        &self,
        id: RequestId,
        owner: &UserId,
    ) -> Result<RequestLookup, RequestPersistenceError>;

    /// Replace the stored record that has the same id.
    async fn save(&self, request: &Request) -> Result<(), RequestPersistenceError>;

    /// Remove the stored record that has the same id.
    async fn remove(&self, request: &Request) -> Result<(), RequestPersistenceError>;
}
