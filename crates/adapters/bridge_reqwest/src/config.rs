//! Bridge connection configuration.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::error::BridgeError;

/// Connection settings for the Globo bridge.
///
/// Constructed once at start-up and handed to the client; never mutated.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Base URL of the bridge, e.g. `http://192.168.1.20:56123/globo`.
    pub base_url: String,
    /// Complete `Authorization` header value (`Basic <base64>`).
    pub basic_auth: Option<String>,
    /// Username used to build the header when `basic_auth` is absent.
    pub username: Option<String>,
    /// Password used to build the header when `basic_auth` is absent.
    pub password: Option<String>,
    /// Requests not completed after this many milliseconds are cancelled.
    pub connect_cancel_ms: u64,
    /// Hard ceiling for a single call, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            basic_auth: None,
            username: None,
            password: None,
            connect_cancel_ms: 3000,
            request_timeout_ms: 7000,
        }
    }
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("base_url", &self.base_url)
            .field("basic_auth", &self.basic_auth.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("connect_cancel_ms", &self.connect_cancel_ms)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl BridgeConfig {
    /// Value of the `Authorization` header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MissingCredential`] when neither a header value
    /// nor a username is configured.
    pub fn authorization(&self) -> Result<String, BridgeError> {
        if let Some(header) = self.basic_auth.as_deref().filter(|h| !h.is_empty()) {
            return Ok(header.to_string());
        }
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(BridgeError::MissingCredential)?;
        let password = self.password.as_deref().unwrap_or_default();
        Ok(format!(
            "Basic {}",
            STANDARD.encode(format!("{username}:{password}"))
        ))
    }

    /// Check that the settings can produce a working client.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MissingBaseUrl`], [`BridgeError::MissingCredential`]
    /// or [`BridgeError::InvalidTimeouts`].
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.base_url.trim().is_empty() {
            return Err(BridgeError::MissingBaseUrl);
        }
        self.authorization()?;
        if self.connect_cancel_ms == 0 || self.connect_cancel_ms > self.request_timeout_ms {
            return Err(BridgeError::InvalidTimeouts {
                connect_cancel_ms: self.connect_cancel_ms,
                request_timeout_ms: self.request_timeout_ms,
            });
        }
        Ok(())
    }
}
