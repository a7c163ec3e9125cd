//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use imobifx_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config.log_format, config.is_production())
        .context("Failed to initialize telemetry")?;

    tracing::info!(
        environment = %config.environment,
        backend = %config.repository_backend,
        "Configuration loaded and validated successfully"
    );

    let repositories = database::setup_repositories(&config).await?;

    let storage = storage::setup_storage(&config).await?;

    let state = services::initialize_services(&config, repositories, storage)?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
