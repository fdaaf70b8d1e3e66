//! HTTP API exposing the conversion router.

mod error;
mod types;

pub use error::ApiError;
pub use types::{ConversionRequest, ConversionResponse};

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::conversion::{ConversionError, ConversionRouter};

#[derive(Clone)]
pub struct AppState {
    router: Arc<ConversionRouter>,
}

impl AppState {
    pub fn new(router: Arc<ConversionRouter>) -> Self {
        Self { router }
    }
}

/// Builds the axum application.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/convert", post(convert))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serves the API on `bind` until Ctrl+C.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(bind = %bind, "API server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Health check.
async fn health() -> &'static str {
    "ok"
}

/// POST /convert - quote the best conversion through one intermediary.
#[instrument(skip_all, fields(source = %req.source, dest = %req.dest, amount = req.amount))]
async fn convert(
    State(state): State<AppState>,
    Json(req): Json<ConversionRequest>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let result = state
        .router
        .convert(&req.source, &req.dest, req.amount)
        .await
        .inspect_err(|e| {
            if let ConversionError::Fetch(err) = e {
                warn!(error = %err, "conversion failed");
            }
        })?;

    Ok(Json(ConversionResponse::from(result)))
}
