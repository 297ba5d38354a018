//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON error body returned when a request cannot be turned into a directive.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Transport-level failures. Directive failures never reach this type: they
/// are answered with an assistant error response instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body is missing, not JSON, or not shaped like a directive envelope.
    #[error("invalid directive envelope: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected request");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
