//! Driving port for registration and session use-cases.
//!
//! Inbound adapters hand over validated inputs plus whatever session token
//! the caller presented; they never see the user or session stores.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, SessionToken, User, UserId};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// Token the caller must present on later requests.
    pub token: SessionToken,
    pub user: User,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account after checking username and email availability.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Verify credentials and open a session.
    ///
    /// `previous` is the token the caller already holds, if any; it is
    /// revoked so each caller keeps a single live session.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
        previous: Option<SessionToken>,
    ) -> Result<SignedIn, Error>;

    /// End the caller's session.
    async fn sign_out(&self, token: Option<SessionToken>) -> Result<(), Error>;

    /// Whether `token` names a live session.
    async fn is_authenticated(&self, token: Option<SessionToken>) -> Result<bool, Error>;

    /// Resolve the caller or fail with a forbidden error.
    async fn require_user(&self, token: Option<SessionToken>) -> Result<UserId, Error>;
}
