//! Authentication domain service.
//!
//! Implements the [`AuthService`] driving port over the user store and the
//! per-caller session table.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AuthService, SessionPersistenceError, SessionRepository, SignedIn, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, PasswordHash, Registration, SessionToken, User, UserId, UserParts,
};

const LOGIN_REQUIRED: &str = "You must be logged in to make a request";
const NOT_SIGNED_IN: &str = "You are not logged in!";

fn map_user_error(error: UserPersistenceError) -> Error {
    Error::internal(format!("user repository error: {error}"))
}

fn map_session_error(error: SessionPersistenceError) -> Error {
    Error::internal(format!("session store error: {error}"))
}

fn taken(field: &str) -> Error {
    Error::conflict(format!("{field} already taken")).with_details(json!({ "field": field }))
}

/// Authentication service backed by a user store and a session table.
#[derive(Clone)]
pub struct AuthServiceImpl<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
}

impl<U, S> AuthServiceImpl<U, S> {
    /// Create a service over the given stores.
    pub fn new(users: Arc<U>, sessions: Arc<S>) -> Self {
        Self { users, sessions }
    }
}

impl<U, S> AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    async fn resolve(&self, token: Option<SessionToken>) -> Result<Option<UserId>, Error> {
        let Some(token) = token else {
            return Ok(None);
        };
        self.sessions
            .resolve(&token)
            .await
            .map_err(map_session_error)
    }
}

#[async_trait]
impl<U, S> AuthService for AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        if self
            .users
            .get_user_by_username(username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            debug!(%username, "registration rejected: username taken");
            return Err(taken("username"));
        }
        if self
            .users
            .get_user_by_email(registration.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            debug!(%username, "registration rejected: email taken");
            return Err(taken("email"));
        }
        if !registration.passwords_match() {
            return Err(
                Error::invalid_request("password and confirm_password fields do not match")
                    .with_details(json!({
                        "field": "confirm_password",
                        "code": "password_mismatch",
                    })),
            );
        }

        let password_hash = PasswordHash::hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = User::new(UserParts {
            id: UserId::random(),
            display_name: registration.display_name().clone(),
            username: username.clone(),
            email: registration.email().clone(),
            password_hash,
        });
        self.users.add_user(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), %username, "user registered");
        Ok(user)
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
        previous: Option<SessionToken>,
    ) -> Result<SignedIn, Error> {
        let username = credentials.username();
        let user = self
            .users
            .get_user_by_username(username)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("{username} does not have an account.")))?;

        let verified = user
            .password_hash()
            .verify(credentials.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        if !verified {
            warn!(%username, "sign-in rejected: bad credentials");
            return Err(Error::forbidden("username or password do not match."));
        }

        if let Some(previous) = previous {
            self.sessions
                .remove(&previous)
                .await
                .map_err(map_session_error)?;
        }
        let token = SessionToken::generate();
        self.sessions
            .insert(token, *user.id())
            .await
            .map_err(map_session_error)?;
        info!(user_id = %user.id(), "signed in");
        Ok(SignedIn { token, user })
    }

    async fn sign_out(&self, token: Option<SessionToken>) -> Result<(), Error> {
        let Some(token) = token else {
            return Err(Error::not_found(NOT_SIGNED_IN));
        };
        match self
            .sessions
            .remove(&token)
            .await
            .map_err(map_session_error)?
        {
            Some(user_id) => {
                info!(%user_id, "signed out");
                Ok(())
            }
            None => Err(Error::not_found(NOT_SIGNED_IN)),
        }
    }

    async fn is_authenticated(&self, token: Option<SessionToken>) -> Result<bool, Error> {
        Ok(self.resolve(token).await?.is_some())
    }

    async fn require_user(&self, token: Option<SessionToken>) -> Result<UserId, Error> {
        self.resolve(token)
            .await?
            .ok_or_else(|| Error::forbidden(LOGIN_REQUIRED))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
