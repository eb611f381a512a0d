//! Roster server binary for the Muster attendance tracker.
//!
//! This is the main entry point that wires together the database pool,
//! the attendance engine, and the HTTP API. It loads configuration,
//! runs migrations, and serves requests until the process is
//! terminated.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `muster.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Build the attendance engine and API state
//! 5. Serve HTTP until terminated

mod config;

use std::path::Path;
use std::sync::Arc;

use muster_api::{start_server, AppState, ServerConfig};
use muster_db::{PostgresConfig, PostgresPool};
use muster_engine::AttendanceEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RosterConfig;

/// Application entry point for the roster server.
///
/// Initializes all subsystems and serves the API. Returns an error
/// code on failure.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = Path::new("muster.yaml");
    let config_found = config_path.exists();
    let config = if config_found {
        RosterConfig::from_file(config_path)?
    } else {
        RosterConfig::default()
    };

    // 2. Initialize structured logging. RUST_LOG takes precedence over
    //    the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("muster-server starting");
    if config_found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        "Configuration resolved"
    );

    // 3. Connect to PostgreSQL and run migrations.
    let pg_config = PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let pool = PostgresPool::connect(&pg_config).await?;
    pool.run_migrations().await?;

    // 4. Build the attendance engine and API state.
    let engine = AttendanceEngine::new(pool.pool().clone());
    let state = Arc::new(AppState::new(engine));

    // 5. Serve HTTP until terminated.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await?;

    pool.close().await;
    info!("muster-server shutdown complete");

    Ok(())
}
