// Web server — Axum backend for the news check form.
//
// The form and its assets are embedded at compile time via include_dir!.
// POST /check-news serves JSON; unmatched paths get a JSON 404 and handler
// panics are caught and turned into a JSON 500.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classifier::traits::NewsClassifier;

pub mod handlers;

// Embed the form page and its static assets.
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Shared application state threaded through all Axum handlers.
///
/// The classifier is built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn NewsClassifier>,
}

/// Start the Axum web server and block until it exits (Ctrl-C).
pub async fn run_server(classifier: Arc<dyn NewsClassifier>, bind: &str, port: u16) -> Result<()> {
    let app = build_router(AppState { classifier });

    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("newscheck listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("newscheck stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/static/{*path}", get(handlers::pages::static_asset))
        .route("/health", get(health))
        .route("/check-news", post(handlers::check::check_news))
        .fallback(handlers::errors::not_found)
        .layer(CatchPanicLayer::custom(handlers::errors::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness check, always 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
