//! Process-local adapters for the store ports.
//!
//! State lives behind `tokio::sync::RwLock`s; each port call holds the lock
//! for exactly one read or mutation, so individual operations are atomic and
//! nothing survives a restart.

mod request_repository;
mod session_repository;
mod user_repository;

pub use request_repository::InMemoryRequestRepository;
pub use session_repository::InMemorySessionRepository;
pub use user_repository::InMemoryUserRepository;
