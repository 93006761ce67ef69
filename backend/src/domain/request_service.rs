//! Request domain service.
//!
//! Implements the request command and query driving ports. Every operation
//! acts for an already-authenticated caller and resolves ownership through
//! [`RequestLookup`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    RequestPersistenceError, RequestRepository, RequestsCommand, RequestsQuery,
};
use crate::domain::{Error, Request, RequestDraft, RequestId, RequestLookup, RequestPatch, UserId};

fn map_repository_error(error: RequestPersistenceError) -> Error {
    match error {
        RequestPersistenceError::Missing { id } => request_missing(id),
        RequestPersistenceError::Unavailable { .. } => {
            Error::internal(format!("request repository error: {error}"))
        }
    }
}

fn request_missing(id: RequestId) -> Error {
    Error::not_found(format!("request {id} doesn't exist."))
}

/// Action the caller attempted, used to phrase ownership refusals.
#[derive(Debug, Clone, Copy)]
enum Access {
    View,
    Edit,
    Delete,
}

impl Access {
    fn refusal(self) -> Error {
        let verb = match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        };
        Error::forbidden(format!("You can only {verb} your own requests"))
    }
}

/// Request service implementing both request driving ports.
#[derive(Clone)]
pub struct RequestService<R> {
    requests: Arc<R>,
}

impl<R> RequestService<R> {
    /// Create a new service over the request repository.
    pub fn new(requests: Arc<R>) -> Self {
        Self { requests }
    }
}

impl<R> RequestService<R>
where
    R: RequestRepository,
{
    async fn owned(
        &self,
        caller: &UserId,
        id: RequestId,
        access: Access,
    ) -> Result<Request, Error> {
        match self
            .requests
            .find(id, caller)
            .await
            .map_err(map_repository_error)?
        {
            RequestLookup::Found(request) => Ok(request),
            RequestLookup::NotFound => Err(request_missing(id)),
            RequestLookup::NotOwned => {
                debug!(%caller, %id, ?access, "refused access to foreign request");
                Err(access.refusal())
            }
        }
    }
}

#[async_trait]
impl<R> RequestsQuery for RequestService<R>
where
    R: RequestRepository,
{
    async fn list(&self, caller: &UserId) -> Result<Vec<Request>, Error> {
        let requests = self
            .requests
            .get_user_requests(caller)
            .await
            .map_err(map_repository_error)?;
        if requests.is_empty() {
            return Err(Error::not_found("You don't have any requests yet"));
        }
        Ok(requests)
    }

    async fn get(&self, caller: &UserId, id: RequestId) -> Result<Request, Error> {
        self.owned(caller, id, Access::View).await
    }
}

#[async_trait]
impl<R> RequestsCommand for RequestService<R>
where
    R: RequestRepository,
{
    async fn create(&self, caller: &UserId, draft: RequestDraft) -> Result<Request, Error> {
        let request = self
            .requests
            .add_request(caller, draft)
            .await
            .map_err(map_repository_error)?;
        info!(%caller, id = %request.id(), "request created");
        Ok(request)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: RequestId,
        patch: RequestPatch,
    ) -> Result<Request, Error> {
        let mut request = self.owned(caller, id, Access::Edit).await?;
        request.apply(patch);
        self.requests
            .save(&request)
            .await
            .map_err(map_repository_error)?;
        info!(%caller, %id, "request updated");
        Ok(request)
    }

    async fn delete(&self, caller: &UserId, id: RequestId) -> Result<(), Error> {
        let request = self.owned(caller, id, Access::Delete).await?;
        self.requests
            .remove(&request)
            .await
            .map_err(map_repository_error)?;
        info!(%caller, %id, "request deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "request_service_tests.rs"]
mod tests;
