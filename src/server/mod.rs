// src/server/mod.rs
//! Appcast update server
//!
//! This module provides an HTTP server that:
//! - Serves appcast metadata for each platform channel of an application
//! - Serves the installers and changelogs those documents point to
//! - Rebuilds the release catalog from disk on every request
//!
//! Every failure is answered with an empty 404; the reason is only logged.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod platform;
pub mod request;
pub mod resolver;
mod routes;

pub use catalog::{Catalog, SkipReason, SkippedEntry, VersionRecord};
pub use config::{AppcastConfig, CatalogSection, ServerSection};
pub use handlers::handle_request;
pub use metrics::{MetricsSnapshot, ServerMetrics};
pub use platform::{ArtifactKind, Platform};
pub use request::{Payload, RequestError, RequestResult};
pub use routes::create_router;

use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application name served when none is configured
pub const DEFAULT_APP_NAME: &str = "your-app";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to, as `host:port` (host names are resolved at bind time)
    pub bind: String,
    /// Root of the release catalog
    pub root_dir: PathBuf,
    /// Application name accepted in request paths
    pub app_name: String,
    /// Emit a tracing span per HTTP request
    pub enable_audit_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "localhost:8000".to_string(),
            root_dir: PathBuf::from("."),
            app_name: DEFAULT_APP_NAME.to_string(),
            enable_audit_log: true,
        }
    }
}

/// Read-only settings every request handler sees
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Root of the release catalog
    pub root_dir: PathBuf,
    /// Application name accepted in request paths
    pub app_name: String,
    /// Address the listener is bound to; used to build download URLs
    pub server_addr: SocketAddr,
}

/// Shared server state
#[derive(Debug)]
pub struct ServerState {
    pub context: ServerContext,
    pub metrics: ServerMetrics,
    pub enable_audit_log: bool,
}

impl ServerState {
    pub fn new(context: ServerContext) -> Self {
        Self {
            context,
            metrics: ServerMetrics::new(),
            enable_audit_log: true,
        }
    }

    /// Toggle per-request tracing spans
    pub fn with_audit_log(mut self, enabled: bool) -> Self {
        self.enable_audit_log = enabled;
        self
    }
}

/// Start the update server and run it until Ctrl-C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    if !config.root_dir.is_dir() {
        return Err(Error::RootDirMissing(config.root_dir));
    }

    let listener = tokio::net::TcpListener::bind(config.bind.as_str()).await?;
    let server_addr = listener.local_addr()?;

    let context = ServerContext {
        root_dir: config.root_dir,
        app_name: config.app_name,
        server_addr,
    };
    tracing::info!(
        "Server started @ '{}' '{}' (app: {})",
        server_addr,
        context.root_dir.display(),
        context.app_name
    );

    let state = Arc::new(ServerState::new(context).with_audit_log(config.enable_audit_log));
    let app = create_router(Arc::clone(&state));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let snapshot = state.metrics.snapshot();
    tracing::info!(
        "Server stopped after {}s: {} requests ({} appcasts, {} files, {} failed), {} served",
        snapshot.uptime_secs,
        snapshot.requests_total,
        snapshot.appcasts_served,
        snapshot.files_served,
        snapshot.failures,
        snapshot.bytes_served_human
    );
    match serde_json::to_string(&snapshot) {
        Ok(json) => tracing::info!("Final metrics: {}", json),
        Err(e) => tracing::warn!("Cannot encode final metrics: {}", e),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
