// Catch-all handlers: unknown routes and panics inside other handlers.

use std::any::Any;

use axum::http::{StatusCode, Uri};
use axum::response::Response;
use tracing::{error, warn};

use crate::web::api_error;

/// Fallback for every route that didn't match.
pub async fn not_found(uri: Uri) -> Response {
    warn!(path = %uri.path(), "No route matched");
    api_error(StatusCode::NOT_FOUND, "Endpoint not found")
}

/// Response for a handler that panicked. Used with `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "Handler panicked");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
