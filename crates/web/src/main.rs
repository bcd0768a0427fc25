// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 sishc-admin Contributors

// sishc admin panel - Web frontend
// Local administration panel for sishc tunnel definitions

mod error;
mod routes;
mod views;

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sishc_admin_common::ConfigStore;

use routes::{create_router, AppState};

/// Default bind address: all interfaces, fixed port.
const DEFAULT_BIND: &str = "0.0.0.0:5000";
/// Environment override for the bind address.
const BIND_ENV: &str = "SISHC_ADMIN_BIND";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sishc_admin_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("sishc admin panel starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = ConfigStore::from_env().context("Failed to resolve configuration paths")?;
    info!("Config file: {}", store.config_path().display());
    info!("Log file: {}", store.log_path().display());

    let state = Arc::new(AppState { store });
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let bind_address = env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context(format!("Failed to bind to {}", bind_address))?;
    info!("Panel listening on http://{}", bind_address);
    info!("No authentication and no TLS - keep this on a trusted network");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Panel shut down");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");

    #[cfg(unix)]
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    };

    #[cfg(not(unix))]
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    };
}
