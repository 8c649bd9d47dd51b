//! AirVoice - Voice assistant for AirGradient monitors
//!
//! CLI entry point for the AirVoice server.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod cli;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "airvoice=info,tower_http=info".into());

    // AIRVOICE_LOG_FORMAT=json for structured logs
    let json_logs = std::env::var("AIRVOICE_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let cli = cli::Cli::parse();

    if cli.command.is_some() {
        info!("AirVoice v{}", env!("CARGO_PKG_VERSION"));
    }

    cli::run(cli).await
}
