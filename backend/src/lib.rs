//! Request tracker backend library.
//!
//! The domain core lives in [`domain`], HTTP adapters in [`inbound`], and
//! in-memory stores in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
