//! Wiring of domain services onto the in-memory stores.

use std::sync::Arc;

use actix_web::web;

use request_tracker::domain::{AuthServiceImpl, RequestService};
use request_tracker::inbound::http::state::HttpState;
use request_tracker::outbound::memory::{
    InMemoryRequestRepository, InMemorySessionRepository, InMemoryUserRepository,
};

/// Build handler state backed by fresh, empty stores.
///
/// Called once per process so every worker shares the same stores.
pub(super) fn build_http_state() -> web::Data<HttpState> {
    let auth = Arc::new(AuthServiceImpl::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
    ));
    let requests = Arc::new(RequestService::new(Arc::new(
        InMemoryRequestRepository::new(),
    )));
    web::Data::new(HttpState::new(auth, requests.clone(), requests))
}
