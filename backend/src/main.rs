//! Server entry point: loads settings, connects the store, then binds.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobbox::inbound::http::health::HealthState;
use jobbox::server::{ServerSettings, build_store, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load configuration")?;
    let backend = settings.store_backend()?;
    let store = build_store(backend)
        .await
        .wrap_err("document store unavailable; refusing to start")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings, store)
        .wrap_err_with(|| format!("failed to bind {}:{}", settings.host(), settings.port()))?;
    info!(host = settings.host(), port = settings.port(), "listening");

    server.await.wrap_err("server terminated with an error")
}
