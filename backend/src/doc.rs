//! OpenAPI documentation for the request tracker.
//!
//! [`ApiDoc`] registers every HTTP endpoint under `/api/v1` plus the health
//! endpoints, the shared error envelope, and the session cookie security scheme.
//! Swagger UI serves it in debug builds.

use crate::inbound::http::auth::{
    MessageResponse, SigninRequest, SignupRequest, UserEnvelope, UserResponse,
};
use crate::inbound::http::requests::{
    CreateRequestBody, RequestEnvelope, RequestListResponse, RequestResponse, UpdateRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/signin.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Request tracker API",
        description = "Account registration, cookie sessions, and per-user request tracking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::signin,
        crate::inbound::http::auth::signout,
        crate::inbound::http::requests::list_requests,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::get_request,
        crate::inbound::http::requests::update_request,
        crate::inbound::http::requests::delete_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        SigninRequest,
        UserResponse,
        UserEnvelope,
        MessageResponse,
        CreateRequestBody,
        UpdateRequestBody,
        RequestResponse,
        RequestEnvelope,
        RequestListResponse
    )),
    tags(
        (name = "auth", description = "Registration and cookie sessions"),
        (name = "requests", description = "Requests owned by the signed-in user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
