//! reqwest implementation of the [`BridgeClient`] port.

use std::error::Error as _;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use globo_skill_app::ports::BridgeClient;
use globo_skill_domain::command::{BridgeMethod, BridgeRequest};
use globo_skill_domain::outcome::BackendOutcome;

use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Message of the transport failure produced when the cancel timer fires.
pub const CANCEL_MESSAGE: &str = "cancel timeout";

/// Bridge client over a shared `reqwest::Client`.
///
/// Each call races the request against two timers: the cancel timer drops
/// (and thereby aborts) a request that has not completed in time, and the
/// overall timeout resolves the call even if the race itself never finishes.
#[derive(Debug, Clone)]
pub struct ReqwestBridgeClient {
    client: reqwest::Client,
    base_url: String,
    connect_cancel: Duration,
    request_timeout: Duration,
}

impl ReqwestBridgeClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the configuration is incomplete, the
    /// credential is not a valid header value, or the TLS backend cannot be
    /// initialised.
    pub fn new(config: &BridgeConfig) -> Result<Self, BridgeError> {
        config.validate()?;

        let mut authorization = HeaderValue::from_str(&config.authorization()?)?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let request_timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            connect_cancel: Duration::from_millis(config.connect_cancel_ms),
            request_timeout,
        })
    }

    fn url(&self, request: &BridgeRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }

    async fn send(&self, request: BridgeRequest) -> BackendOutcome {
        let method = match request.method() {
            BridgeMethod::Get => Method::GET,
            BridgeMethod::Put => Method::PUT,
        };

        let response = match self.client.request(method, self.url(&request)).send().await {
            Ok(response) => response,
            Err(err) => return BackendOutcome::TransportFailure(describe(&err)),
        };

        let status = response.status();
        if !status.is_success() {
            return BackendOutcome::HttpFailure(status.as_u16());
        }

        match response.text().await {
            Ok(body) => BackendOutcome::Success(body),
            Err(err) => BackendOutcome::TransportFailure(describe(&err)),
        }
    }
}

impl BridgeClient for ReqwestBridgeClient {
    #[tracing::instrument(skip_all, fields(%request))]
    async fn call(&self, request: BridgeRequest) -> BackendOutcome {
        let raced = async {
            tokio::select! {
                outcome = self.send(request) => outcome,
                () = tokio::time::sleep(self.connect_cancel) => {
                    tracing::warn!(
                        after_ms = %self.connect_cancel.as_millis(),
                        "bridge request cancelled"
                    );
                    BackendOutcome::TransportFailure(CANCEL_MESSAGE.to_string())
                }
            }
        };

        let outcome = tokio::time::timeout(self.request_timeout, raced)
            .await
            .unwrap_or_else(|_| {
                BackendOutcome::TransportFailure(format!(
                    "bridge did not answer within {} ms",
                    self.request_timeout.as_millis()
                ))
            });

        match &outcome {
            BackendOutcome::Success(body) => tracing::debug!(body_len = body.len(), "bridge answered"),
            BackendOutcome::HttpFailure(status) => tracing::warn!(status, "bridge rejected request"),
            BackendOutcome::TransportFailure(message) => {
                tracing::warn!(%message, "bridge unreachable");
            }
        }
        outcome
    }
}

/// Render a reqwest error with its source chain (`error sending request: connection refused`).
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
