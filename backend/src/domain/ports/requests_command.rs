//! Driving port for request mutations.

use async_trait::async_trait;

use crate::domain::{Error, Request, RequestDraft, RequestId, RequestPatch, UserId};

/// Write-side use-cases for tracked requests.
///
/// Every method acts on behalf of `caller`; requests owned by anyone else
/// are refused with a forbidden error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestsCommand: Send + Sync {
    async fn create(&self, caller: &UserId, draft: RequestDraft) -> Result<Request, Error>;

    async fn update(
        &self,
        caller: &UserId,
        id: RequestId,
        patch: RequestPatch,
    ) -> Result<Request, Error>;

    async fn delete(&self, caller: &UserId, id: RequestId) -> Result<(), Error>;
}
