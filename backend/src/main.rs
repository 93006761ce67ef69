//! Backend entry-point: loads settings, wires the in-memory stores, and
//! serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use mockable::Env;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use request_tracker::inbound::http::health::HealthState;
use request_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = load_server_config(
        std::env::args_os().collect(),
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Combine listener settings and session settings into a [`ServerConfig`].
fn load_server_config<E: Env>(
    args: Vec<OsString>,
    env: &E,
    mode: BuildMode,
) -> std::io::Result<ServerConfig> {
    let settings = ServerSettings::load_from_iter(args)
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings_from_env(env, mode).map_err(std::io::Error::other)?;
    Ok(ServerConfig::new(
        session.key,
        session.cookie_secure,
        settings.bind_addr(),
    ))
}
