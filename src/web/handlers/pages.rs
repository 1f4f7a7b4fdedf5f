// GET / (the form) and GET /static/{*path} (its assets).

use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::web::{api_error, ASSETS};

/// GET / — the news check form.
pub async fn index() -> Response {
    match ASSETS.get_file("index.html") {
        Some(file) => asset_response(file.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Web assets not found in the binary"),
        )
            .into_response(),
    }
}

/// GET /static/{*path} — embedded CSS/JS, JSON 404 for anything else.
pub async fn static_asset(Path(path): Path<String>) -> Response {
    match ASSETS.get_file(path.trim_start_matches('/')) {
        Some(file) => asset_response(file.contents(), &path),
        None => api_error(StatusCode::NOT_FOUND, "Endpoint not found"),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

pub fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_type("app.js"), "application/javascript");
        assert_eq!(mime_type("style.css"), "text/css");
        assert_eq!(mime_type("noextension"), "application/octet-stream");
    }

    #[test]
    fn test_embedded_form_present() {
        assert!(ASSETS.get_file("index.html").is_some());
    }
}
