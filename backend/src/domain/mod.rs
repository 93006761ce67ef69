//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the strongly typed entities behind the request tracker and
//! the use-cases that act on them. Nothing in this module knows about HTTP or
//! about how the stores are implemented.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - User, Request, SessionToken: the three records the service keeps.
//! - ports: traits for driven stores and driving use-cases.
//! - AuthServiceImpl / RequestService: use-case implementations.

pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod request;
pub mod session;
mod text;
pub mod trace_id;
pub mod user;

mod auth_service;
mod request_service;

pub use self::auth::{
    CredentialsValidationError, LoginCredentials, Registration, RegistrationInput,
};
pub use self::auth_service::AuthServiceImpl;
pub use self::error::{Error, ErrorCode};
pub use self::password::{Password, PasswordHash, PasswordHashError};
pub use self::request::{
    Request, RequestDraft, RequestId, RequestLocation, RequestLookup, RequestPatch, RequestTitle,
    RequestType, RequestValidationError,
};
pub use self::request_service::RequestService;
pub use self::session::SessionToken;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, EmailAddress, User, UserId, UserParts, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use request_tracker::domain::{ApiResult, Error};
///
/// fn guarded() -> ApiResult<()> {
///     Err(Error::forbidden("You must be logged in to make a request"))
/// }
///
/// assert!(guarded().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
