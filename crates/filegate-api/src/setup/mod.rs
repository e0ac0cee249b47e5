//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::constants::{SERVICE_NAME, VERSION};
use crate::state::AppState;
use anyhow::{Context, Result};
use filegate_core::Config;
use filegate_infra::{init_telemetry, LogFormat};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    init_telemetry(
        SERVICE_NAME,
        VERSION,
        config.environment(),
        LogFormat::from_env(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = Arc::new(AppState::from_config(config.clone())?);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
