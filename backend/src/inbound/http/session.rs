//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The encrypted session cookie carries only an opaque [`SessionToken`]; the
//! domain session table decides which user (if any) it belongs to.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionToken, UserId};
use crate::inbound::http::state::HttpState;

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the caller's session token in the cookie.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0
            .insert(SESSION_TOKEN_KEY, token.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token presented by the caller, if any.
    ///
    /// Values that do not parse are treated as absent.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| {
            let token = SessionToken::parse(&raw);
            if token.is_none() {
                tracing::warn!("invalid session token in cookie");
            }
            token
        }))
    }

    /// Drop everything stored in the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// The signed-in user behind a request.
///
/// Actix resolves handler arguments in declaration order, so list `Caller`
/// before any body or path extractor: anonymous callers are then refused
/// with 403 before their input is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(UserId);

impl Caller {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let auth = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| state.auth.clone());
        Box::pin(async move {
            let auth = auth.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let session = session.await.map_err(Error::from)?;
            auth.require_user(session.token()?).await.map(Caller)
        })
    }
}
