//! Registration and session handlers.
//!
//! ```text
//! POST /api/v1/auth/signup  {"name":"Ann","username":"ann","email":"ann@x.com",
//!                            "password":"pw","confirmPassword":"pw"}
//! POST /api/v1/auth/signin  {"username":"ann","password":"pw"}
//! POST /api/v1/auth/signout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, Registration, RegistrationInput, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, empty_field_error, require};

const NAME: FieldName = FieldName::new("name");
const USERNAME: FieldName = FieldName::new("username");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const CONFIRM_PASSWORD: FieldName = FieldName::new("confirm_password");

/// Registration body for `POST /api/v1/auth/signup`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name.
    #[serde(alias = "displayName")]
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "confirm_password")]
    pub confirm_password: Option<String>,
}

/// Sign-in body for `POST /api/v1/auth/signin`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SigninRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Public view of a registered user; never carries the password.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ann Example")]
    pub display_name: String,
    #[schema(example = "ann")]
    pub username: String,
    #[schema(example = "ann@x.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// `{"user": {...}}` envelope returned by sign-up.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// `{"message": "..."}` confirmation body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    empty_field_error(err.field(), &err)
}

fn registration_from(body: &SignupRequest) -> Result<Registration, Error> {
    let input = RegistrationInput {
        name: require(body.name.as_deref(), NAME)?,
        username: require(body.username.as_deref(), USERNAME)?,
        email: require(body.email.as_deref(), EMAIL)?,
        password: require(body.password.as_deref(), PASSWORD)?,
        confirm_password: require(body.confirm_password.as_deref(), CONFIRM_PASSWORD)?,
    };
    Registration::try_from_input(input).map_err(map_credentials_error)
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (
            status = 400,
            description = "Missing or empty field, or passwords differ",
            body = ErrorSchema
        ),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let registration = registration_from(&payload)?;
    let user = state.auth.register(&registration).await?;
    Ok(HttpResponse::Created().json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// Sign in and receive a session cookie.
///
/// A caller who is already signed in has their previous session replaced.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing or empty field", body = ErrorSchema),
        (status = 403, description = "Password does not match", body = ErrorSchema),
        (status = 404, description = "No account for this username", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signin",
    security([])
)]
#[post("/auth/signin")]
pub async fn signin(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SigninRequest>,
) -> ApiResult<HttpResponse> {
    let username = require(payload.username.as_deref(), USERNAME)?;
    let password = require(payload.password.as_deref(), PASSWORD)?;
    let credentials =
        LoginCredentials::try_from_parts(username, password).map_err(map_credentials_error)?;
    let signed_in = state.auth.sign_in(&credentials, session.token()?).await?;
    session.persist_token(&signed_in.token)?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "you are now signed in as {}",
        signed_in.user.username()
    ))))
}

/// End the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 404, description = "Caller is not signed in", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signout"
)]
#[post("/auth/signout")]
pub async fn signout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    state.auth.sign_out(session.token()?).await?;
    session.purge();
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "You've been signed out successfully!",
    )))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
