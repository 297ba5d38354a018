//! Bridge adapter error types.
//!
//! These cover client construction only. Failures of an individual call are
//! never errors: they are folded into a `BackendOutcome`.

/// Errors raised while building the bridge client.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No base URL configured.
    #[error("bridge base URL is not configured")]
    MissingBaseUrl,

    /// Neither an Authorization header value nor a username configured.
    #[error("bridge credential is not configured")]
    MissingCredential,

    /// The cancel timer must be positive and not exceed the overall timeout.
    #[error(
        "connect cancel ({connect_cancel_ms} ms) must be positive and at most the request timeout ({request_timeout_ms} ms)"
    )]
    InvalidTimeouts {
        connect_cancel_ms: u64,
        request_timeout_ms: u64,
    },

    /// The credential cannot be sent as a header value.
    #[error("invalid Authorization header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
}
