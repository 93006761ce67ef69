//! Driving port for reading a caller's requests.

use async_trait::async_trait;

use crate::domain::{Error, Request, RequestId, UserId};

/// Read-side use-cases for tracked requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestsQuery: Send + Sync {
    /// Every request `caller` owns, oldest first. Empty is a not-found error.
    async fn list(&self, caller: &UserId) -> Result<Vec<Request>, Error>;

    /// A single request, provided `caller` owns it.
    async fn get(&self, caller: &UserId, id: RequestId) -> Result<Request, Error>;
}
