//! chatroomd - a single-room TCP chat server.
//!
//! Clients speak a plain line protocol: anything that does not start with `/`
//! is chat, everything else is a command.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod network;
mod state;
mod telemetry;

use crate::config::Config;
use crate::handlers::Dispatcher;
use crate::network::Gateway;
use crate::state::Matrix;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; without a path the built-in defaults apply.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    info!(
        address = %config.listen.address,
        max_clients = config.limits.max_clients,
        "Starting chatroomd"
    );

    // Prometheus metrics are optional.
    // Convention: metrics_port absent or 0 disables the HTTP endpoint.
    match config.server.metrics_port {
        Some(port) if port != 0 => {
            metrics::init();
            tokio::spawn(async move {
                if let Err(e) = http::serve_metrics(port).await {
                    error!(port, error = %e, "Metrics endpoint failed");
                }
            });
        }
        _ => info!("Prometheus metrics disabled"),
    }

    let matrix = Arc::new(Matrix::new(&config.limits));
    let dispatcher = Arc::new(Dispatcher::new());

    let gateway = Gateway::bind(&config.listen, Arc::clone(&matrix), Arc::clone(&dispatcher))?;

    gateway
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!(commands = ?dispatcher.command_stats(), "Server stopped");
    Ok(())
}
