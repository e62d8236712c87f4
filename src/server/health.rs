//! Liveness probe endpoint.

use axum::http::StatusCode;

/// Returns 200 OK while the process is up and serving.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
