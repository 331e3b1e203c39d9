//! `/metrics` endpoint for Prometheus scraping.

use axum::http::header;
use axum::response::IntoResponse;
use axum::{Router, routing::get};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

async fn scrape() -> impl IntoResponse {
    let content_type = TextEncoder::new().format_type().to_string();
    (
        [(header::CONTENT_TYPE, content_type)],
        crate::metrics::gather_metrics(),
    )
}

/// Serve `/metrics` on `0.0.0.0:port` until the process exits.
pub async fn serve_metrics(port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    serve(listener).await
}

async fn serve(listener: TcpListener) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "Metrics endpoint listening");
    let app = Router::new().route("/metrics", get(scrape));
    axum::serve(listener, app).await
}
