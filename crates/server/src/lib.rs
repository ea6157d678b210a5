#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filinglens/filinglens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::Config;
pub use error::ServerError;
pub use state::AppState;

/// Build the API router over a shared application state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/init_filters", get(handlers::init_filters))
        .route("/api/metrics", post(handlers::metrics))
        .route("/api/charts/distribution", post(handlers::distribution))
        .route("/api/charts/heatmap", post(handlers::heatmap))
        .route("/api/charts/scatter", post(handlers::scatter))
        .route("/api/feature_importance", get(handlers::feature_importance))
        .route("/api/predict", post(handlers::predict))
        .route("/api/export", post(handlers::export))
        .with_state(state)
}

/// Initialize the global tracing subscriber. `RUST_LOG` wins over the
/// configured default level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Bind `addr` and serve the API until interrupted.
///
/// # Errors
/// Fails when the address cannot be bound or the server loop errors.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server loop failed")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
