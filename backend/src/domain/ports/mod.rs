//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by storage adapters; driving
//! ports (`AuthService`, `RequestsCommand`, `RequestsQuery`) are called by
//! inbound adapters. Each driven port exposes its own `thiserror` enum so
//! adapters report failures without leaking their internals.

mod auth_service;
mod request_repository;
mod requests_command;
mod requests_query;
mod session_repository;
mod user_repository;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, SignedIn};
#[cfg(test)]
pub use request_repository::MockRequestRepository;
pub use request_repository::{RequestPersistenceError, RequestRepository};
#[cfg(test)]
pub use requests_command::MockRequestsCommand;
pub use requests_command::RequestsCommand;
#[cfg(test)]
pub use requests_query::MockRequestsQuery;
pub use requests_query::RequestsQuery;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionPersistenceError, SessionRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
