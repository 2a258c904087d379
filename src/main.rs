// src/main.rs

use anyhow::{Context, Result};
use appcast_server::server::config::{join_bind, split_bind};
use appcast_server::server::AppcastConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "appcast-server")]
#[command(author, version, long_about = None)]
#[command(about = "Basic auto-update server for development purposes")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory where the update files are
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Port number
    #[arg(long)]
    port: Option<u16>,

    /// Address (host name or IP) to bind to
    #[arg(long)]
    address: Option<String>,

    /// Application name served in request paths
    #[arg(long)]
    app_name: Option<String>,

    /// Log every request outcome (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let file_config = match &cli.config {
        Some(path) => AppcastConfig::load(path)?,
        None => AppcastConfig::default(),
    };
    let mut config = file_config.to_server_config();

    if cli.address.is_some() || cli.port.is_some() {
        let (host, port) = split_bind(&config.bind)?;
        let host = cli.address.as_deref().unwrap_or(host);
        let bind = join_bind(host, cli.port.unwrap_or(port));
        config.bind = bind;
    }
    if let Some(app_name) = cli.app_name {
        config.app_name = app_name;
    }
    if let Some(dir) = cli.dir.filter(|d| !d.as_os_str().is_empty()) {
        config.root_dir = dir;
    }

    config.root_dir = config
        .root_dir
        .canonicalize()
        .with_context(|| format!("Root directory does not exist: {}", config.root_dir.display()))?;

    info!("Serving '{}' from {}", config.app_name, config.root_dir.display());
    appcast_server::run_server(config).await?;
    Ok(())
}
