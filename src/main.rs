//! # Interiors Vision Inquiry Service Entry Point
//!
//! Loads layered configuration, opens and migrates the inquiry store, then
//! serves the submission endpoint.

use anyhow::{Context, Result};
use interiors_vision::{config::ConfigLoader, db, server::run_server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load().context("loading configuration")?;

    telemetry::init_tracing(&config).context("initializing tracing")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_and_migrate(&config)
        .await
        .context("initializing inquiry store")?;

    run_server(config, db).await
}
