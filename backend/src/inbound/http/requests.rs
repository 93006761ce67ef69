//! Request tracking handlers.
//!
//! ```text
//! GET    /api/v1/requests
//! POST   /api/v1/requests       {"title":"Fix light","location":"Block A",
//!                               "requestType":"maintenance"}
//! GET    /api/v1/requests/{id}
//! PUT    /api/v1/requests/{id}  {"location":"Block B","description":null}
//! DELETE /api/v1/requests/{id}
//! ```
//!
//! Every handler takes a [`Caller`] ahead of its path and body extractors, so
//! the session guard rejects anonymous callers before any input is decoded.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Request, RequestDraft, RequestId, RequestPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::Caller;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, empty_field_error, require};

const TITLE: FieldName = FieldName::new("title");
const LOCATION: FieldName = FieldName::new("location");
const REQUEST_TYPE: FieldName = FieldName::new("request_type");

/// Body for `POST /api/v1/requests`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub title: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "request_type")]
    pub request_type: Option<String>,
    pub description: Option<String>,
}

/// Body for `PUT /api/v1/requests/{id}`; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestBody {
    pub title: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "request_type")]
    pub request_type: Option<String>,
    /// `null` clears the description; omitting it keeps the current one.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
}

/// Map a present field to `Some`, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Wire view of a tracked request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub owner_id: String,
    #[schema(example = "Fix light")]
    pub title: String,
    #[schema(example = "Block A")]
    pub location: String,
    #[schema(example = "maintenance")]
    pub request_type: String,
    pub description: Option<String>,
}

impl From<&Request> for RequestResponse {
    fn from(request: &Request) -> Self {
        Self {
            id: request.id().get(),
            owner_id: request.owner().to_string(),
            title: request.title().to_string(),
            location: request.location().to_string(),
            request_type: request.request_type().to_string(),
            description: request.description().map(str::to_owned),
        }
    }
}

/// `{"request": {...}}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestEnvelope {
    pub request: RequestResponse,
}

impl From<&Request> for RequestEnvelope {
    fn from(request: &Request) -> Self {
        Self {
            request: RequestResponse::from(request),
        }
    }
}

/// `{"requests": [...]}` envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestListResponse {
    pub requests: Vec<RequestResponse>,
}

fn draft_from(body: &CreateRequestBody) -> Result<RequestDraft, Error> {
    RequestDraft::try_from_parts(
        require(body.title.as_deref(), TITLE)?,
        require(body.location.as_deref(), LOCATION)?,
        require(body.request_type.as_deref(), REQUEST_TYPE)?,
        body.description.clone(),
    )
    .map_err(|err| empty_field_error(err.field(), &err))
}

fn patch_from(body: UpdateRequestBody) -> Result<RequestPatch, Error> {
    RequestPatch::try_from_parts(
        body.title.as_deref(),
        body.location.as_deref(),
        body.request_type.as_deref(),
        body.description,
    )
    .map_err(|err| empty_field_error(err.field(), &err))
}

/// List the caller's requests.
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    responses(
        (status = 200, description = "Caller's requests", body = RequestListResponse),
        (status = 403, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Caller has no requests yet", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listRequests"
)]
#[get("/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<RequestListResponse>> {
    let requests = state.requests_query.list(caller.user_id()).await?;
    Ok(web::Json(RequestListResponse {
        requests: requests.iter().map(RequestResponse::from).collect(),
    }))
}

/// File a new request owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = RequestEnvelope),
        (status = 400, description = "Missing or empty field", body = ErrorSchema),
        (status = 403, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = draft_from(&payload)?;
    let request = state.requests.create(caller.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(RequestEnvelope::from(&request)))
}

/// Fetch one of the caller's requests.
#[utoipa::path(
    get,
    path = "/api/v1/requests/{id}",
    params(("id" = u64, Path, description = "Request id")),
    responses(
        (status = 200, description = "The request", body = RequestEnvelope),
        (status = 403, description = "Not signed in, or owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such request", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "getRequest"
)]
#[get("/requests/{id}")]
pub async fn get_request(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<u64>,
) -> ApiResult<web::Json<RequestEnvelope>> {
    let id = RequestId::new(path.into_inner());
    let request = state.requests_query.get(caller.user_id(), id).await?;
    Ok(web::Json(RequestEnvelope::from(&request)))
}

/// Change some fields of one of the caller's requests.
#[utoipa::path(
    put,
    path = "/api/v1/requests/{id}",
    params(("id" = u64, Path, description = "Request id")),
    request_body = UpdateRequestBody,
    responses(
        (status = 200, description = "Updated request", body = RequestEnvelope),
        (status = 400, description = "A present field is empty", body = ErrorSchema),
        (status = 403, description = "Not signed in, or owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such request", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "updateRequest"
)]
#[put("/requests/{id}")]
pub async fn update_request(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<u64>,
    payload: web::Json<UpdateRequestBody>,
) -> ApiResult<web::Json<RequestEnvelope>> {
    let id = RequestId::new(path.into_inner());
    let patch = patch_from(payload.into_inner())?;
    let request = state.requests.update(caller.user_id(), id, patch).await?;
    Ok(web::Json(RequestEnvelope::from(&request)))
}

/// Delete one of the caller's requests.
#[utoipa::path(
    delete,
    path = "/api/v1/requests/{id}",
    params(("id" = u64, Path, description = "Request id")),
    responses(
        (status = 200, description = "Request deleted", body = MessageResponse),
        (status = 403, description = "Not signed in, or owned by someone else", body = ErrorSchema),
        (status = 404, description = "No such request", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "deleteRequest"
)]
#[delete("/requests/{id}")]
pub async fn delete_request(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<u64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = RequestId::new(path.into_inner());
    state.requests.delete(caller.user_id(), id).await?;
    Ok(web::Json(MessageResponse::new(
        "Your request was successfully deleted",
    )))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
