//! Backend outcome: the normalised result of one bridge call, and the
//! mapping of its failures onto assistant error kinds.

use crate::error::ErrorKind;

/// Result of a single bridge call. Produced once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOutcome {
    /// Any 2xx; the raw response body.
    Success(String),
    /// The bridge answered with a non-success status code.
    HttpFailure(u16),
    /// No usable answer: connection error, cancellation, timeout, unreadable body.
    TransportFailure(String),
}

impl BackendOutcome {
    /// Split into the success body or the failure.
    ///
    /// # Errors
    ///
    /// Returns the [`BackendFailure`] for the two failure variants.
    pub fn into_body(self) -> Result<String, BackendFailure> {
        match self {
            Self::Success(body) => Ok(body),
            Self::HttpFailure(status) => Err(BackendFailure::Http(status)),
            Self::TransportFailure(message) => Err(BackendFailure::Transport(message)),
        }
    }
}

/// A failed bridge call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendFailure {
    #[error("The globo bridge responded with status {0}.")]
    Http(u16),

    #[error("{0}")]
    Transport(String),
}

impl BackendFailure {
    /// Error kind surfaced to the assistant.
    ///
    /// | failure | kind |
    /// |---|---|
    /// | HTTP 400 | `INVALID_VALUE` |
    /// | HTTP 401 | `INSUFFICIENT_PERMISSIONS` |
    /// | HTTP 404 | `NO_SUCH_ENDPOINT` |
    /// | other HTTP | `INTERNAL_ERROR` |
    /// | transport | `BRIDGE_UNREACHABLE` |
    #[must_use]
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Http(400) => ErrorKind::InvalidValue,
            Self::Http(401) => ErrorKind::InsufficientPermissions,
            Self::Http(404) => ErrorKind::NoSuchEndpoint,
            Self::Http(_) => ErrorKind::InternalError,
            Self::Transport(_) => ErrorKind::BridgeUnreachable,
        }
    }
}
