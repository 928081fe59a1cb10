// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `boxtrack serve` command implementation.
//!
//! Opens the SQLite store (running migrations), builds the HTTP server
//! state, and serves until interrupted. On shutdown the store is
//! checkpointed and closed.

use std::sync::Arc;

use boxtrack_config::BoxtrackConfig;
use boxtrack_core::{BoxStore, BoxtrackError};
use boxtrack_server::{AppState, ServerConfig, start_server};
use boxtrack_storage::SqliteStore;
use tracing::{error, info};

/// Runs the `boxtrack serve` command.
pub async fn run_serve(config: BoxtrackConfig) -> Result<(), BoxtrackError> {
    init_tracing(&config.tracker.log_level);

    info!(name = %config.tracker.name, "starting boxtrack serve");

    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    info!(path = %config.storage.database_path, "storage ready");

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = AppState::new(store.clone());

    tokio::select! {
        result = start_server(&server_config, state) => {
            if let Err(e) = &result {
                error!(error = %e, "server exited with error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    store.close().await?;
    info!("boxtrack serve stopped");
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching the config file.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
