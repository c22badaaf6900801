//! Blog entry-point: loads settings, migrates the schema and serves pages.

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog::inbound::http::health::HealthState;
use blog::inbound::http::session_config::{BuildMode, session_settings_from_env};
use blog::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use blog::server::{ServerSettings, create_server, diesel_http_state};

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

    let settings =
        ServerSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    run_migrations(settings.database_url())
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(settings.database_url()))
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    info!(host = %bind_addr.0, port = bind_addr.1, "starting blog server");
    let server = create_server(
        health_state.clone(),
        diesel_http_state(&pool),
        session,
        bind_addr,
    )?;

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
