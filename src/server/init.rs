//! Server initialization and main run loop
//!
//! Contains the main `run()` function that starts all server components.

use super::config::AppConfig;
use super::loader::load_config;
use super::shutdown::wait_for_shutdown_signal;
use super::validation::validate_production_config;
use airvoice_core::{SessionBackend, Skill};
use airvoice_devices::AirGradientClient;
use anyhow::{Context, Result};
use axum::{Extension, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting AirVoice v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!("Configuration loaded");

    validate_production_config(&config)?;

    let skill = build_skill(&config).await?;
    let app = build_router(skill);

    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("AirVoice shutdown complete");
    Ok(())
}

/// Wire the device directory and session store into a skill
pub async fn build_skill(config: &AppConfig) -> Result<Arc<Skill>> {
    let directory = AirGradientClient::new(config.airgradient.clone())
        .context("Failed to create AirGradient client")?;

    let store = SessionBackend::from_config(&config.persistence)
        .await
        .context("Failed to initialize session store")?;
    info!(backend = store.name(), "Session store initialized");

    let skill = Skill::new(config.skill.clone(), Arc::new(directory), Arc::new(store));
    info!(name = %skill.config().name, "Skill initialized");

    Ok(Arc::new(skill))
}

/// Build the HTTP router around a skill
pub fn build_router(skill: Arc<Skill>) -> Router {
    Router::new()
        .merge(crate::api::health_routes())
        .merge(crate::api::skill_routes())
        .layer(Extension(skill))
        .layer(TraceLayer::new_for_http())
}
