//! Virtual bridge error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Why the bridge refused a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Neither `light` nor `fan`.
    #[error("Device not found.")]
    UnknownDevice(String),

    /// The device does not understand the command.
    #[error("Unknown {device} command.")]
    UnknownCommand {
        device: &'static str,
        command: String,
    },

    /// A `DIMM` value is missing or not a number.
    #[error("Invalid value.")]
    InvalidValue(Option<String>),
}

impl CommandError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownDevice(_) => StatusCode::NOT_FOUND,
            Self::UnknownCommand { .. } | Self::InvalidValue(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        tracing::warn!(error = ?self, "virtual bridge rejected request");
        (self.status_code(), self.to_string()).into_response()
    }
}
