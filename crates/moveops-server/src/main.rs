//! MoveOps proxy server binary
//!
//! Serves the same-origin `/api` proxy in front of the back-office API,
//! plus health and metrics endpoints.

mod app;
mod config;

use clap::Parser;
use moveops_observability::{Metrics, ReadinessChecker, logging::init_logging};
use moveops_proxy::Upstream;
use std::sync::Arc;
use tracing::info;

use crate::app::{UpstreamReadiness, build_app};
use crate::config::ServerConfig;

/// MoveOps Proxy - same-origin gateway for the MoveOps web app
#[derive(Parser)]
#[command(name = "moveops-server")]
#[command(about = "MoveOps same-origin API proxy server", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "MOVEOPS_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("failed to load config from {}: {}", path, e))?,
        None => ServerConfig::default(),
    };
    config.merge_env();

    init_logging(&config.logging.level)?;

    let upstream_base = config.resolve_upstream()?;
    info!("Forwarding to upstream API at {}", upstream_base);

    let upstream = Upstream::new(upstream_base.clone())?;
    let metrics = Arc::new(Metrics::new()?);
    let readiness: Arc<dyn ReadinessChecker> = UpstreamReadiness::spawn(upstream_base);

    let app = build_app(&config, upstream, metrics, Some(readiness));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MoveOps proxy listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
