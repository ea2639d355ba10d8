use axum::{http::StatusCode, response::Response};

use super::error_response;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "the requested resource was not found",
    )
}
