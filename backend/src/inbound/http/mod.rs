//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod requests;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the JSON API on `cfg`.
///
/// Mount it under `/api/v1` behind the session middleware; handlers read
/// [`state::HttpState`] from app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use request_tracker::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(auth::signup)
        .service(auth::signin)
        .service(auth::signout)
        .service(requests::list_requests)
        .service(requests::create_request)
        .service(requests::get_request)
        .service(requests::update_request)
        .service(requests::delete_request);
}
