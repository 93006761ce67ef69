//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, RequestsCommand, RequestsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub requests: Arc<dyn RequestsCommand>,
    pub requests_query: Arc<dyn RequestsQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use request_tracker::domain::{AuthServiceImpl, RequestService};
    /// use request_tracker::inbound::http::state::HttpState;
    /// use request_tracker::outbound::memory::{
    ///     InMemoryRequestRepository, InMemorySessionRepository, InMemoryUserRepository,
    /// };
    ///
    /// let auth = AuthServiceImpl::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(InMemorySessionRepository::new()),
    /// );
    /// let requests = Arc::new(RequestService::new(Arc::new(InMemoryRequestRepository::new())));
    /// let state = HttpState::new(Arc::new(auth), requests.clone(), requests);
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(
        auth: Arc<dyn AuthService>,
        requests: Arc<dyn RequestsCommand>,
        requests_query: Arc<dyn RequestsQuery>,
    ) -> Self {
        Self {
            auth,
            requests,
            requests_query,
        }
    }
}
