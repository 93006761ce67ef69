//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are decoded into DTOs with optional fields so a missing
//! field and an empty one can be reported separately. Extractor failures
//! (malformed JSON, non-numeric path ids) are routed through the same error
//! envelope as domain failures.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        format!("missing required field: {field}"),
        ErrorCode::MissingField,
    )
}

/// Report a present but blank field; `message` comes from domain validation.
pub(crate) fn empty_field_error(field: &str, message: impl std::fmt::Display) -> Error {
    field_error(field, message.to_string(), ErrorCode::EmptyField)
}

/// Unwrap a required body field or report it as missing.
pub(crate) fn require(value: Option<&str>, field: FieldName) -> Result<&str, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "rejected request body");
    Error::invalid_request(format!("malformed JSON body: {err}")).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, path = req.path(), "rejected path parameter");
    Error::not_found(format!("no resource at {}", req.path())).into()
}

/// JSON extractor configuration reporting decode failures as `400`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration reporting unparsable ids as `404`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
