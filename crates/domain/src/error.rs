//! Error types used across the workspace.
//!
//! [`ErrorKind`] is the assistant-visible taxonomy carried in an error
//! response. [`DirectiveError`] is everything that can go wrong while handling
//! a single directive; each variant knows which [`ErrorKind`] it surfaces as.

use std::fmt;

use serde::Serialize;

use crate::endpoint::DeviceClass;
use crate::outcome::BackendFailure;
use crate::status::StatusParseError;

/// Error types understood by the assistant (`payload.type` of an error response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValueOutOfRange,
    InvalidDirective,
    NoSuchEndpoint,
    InvalidValue,
    InsufficientPermissions,
    InternalError,
    BridgeUnreachable,
}

impl ErrorKind {
    /// Wire representation, e.g. `"NO_SUCH_ENDPOINT"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::InvalidDirective => "INVALID_DIRECTIVE",
            Self::NoSuchEndpoint => "NO_SUCH_ENDPOINT",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::InternalError => "INTERNAL_ERROR",
            Self::BridgeUnreachable => "BRIDGE_UNREACHABLE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while handling one directive.
///
/// The display string becomes the `payload.message` of the error response.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// A non-discovery directive arrived without an endpoint.
    #[error("Directive '{name}' requires an endpoint.")]
    MissingEndpoint { name: String },

    /// The endpoint id is not part of the static catalog.
    #[error("Unknown endpoint '{0}'.")]
    UnknownEndpoint(String),

    /// The directive name is not supported by the addressed device.
    #[error("Directive '{name}' is invalid for globo {device}.")]
    Unsupported { name: String, device: DeviceClass },

    /// A percentage payload value lies outside `[0, 100]`.
    #[error("Value '{value}' ({property}) is out of range for globo {device}.")]
    OutOfRange {
        property: &'static str,
        value: String,
        device: DeviceClass,
    },

    /// A percentage payload value is missing or not an integer.
    #[error("Value '{value}' ({property}) is not a valid percentage for globo {device}.")]
    InvalidValue {
        property: &'static str,
        value: String,
        device: DeviceClass,
    },

    /// The bridge call failed.
    #[error(transparent)]
    Backend(#[from] BackendFailure),

    /// The bridge answered with a status string that cannot be translated.
    #[error(transparent)]
    Status(#[from] StatusParseError),
}

impl DirectiveError {
    /// The assistant-visible error kind for this failure.
    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::MissingEndpoint { .. } | Self::Unsupported { .. } => ErrorKind::InvalidDirective,
            Self::UnknownEndpoint(_) => ErrorKind::NoSuchEndpoint,
            Self::OutOfRange { .. } => ErrorKind::ValueOutOfRange,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::Backend(failure) => failure.error_kind(),
            Self::Status(_) => ErrorKind::BridgeUnreachable,
        }
    }
}
