//! Virtual bridge configuration.

use serde::Deserialize;

use crate::auth::Credentials;

/// Configuration for the embedded virtual bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualBridgeConfig {
    /// Serve the virtual bridge and point the skill at it.
    pub enabled: bool,
    /// Address to bind to.
    pub host: String,
    /// TCP port (the real bridge listens on 56123).
    pub port: u16,
    /// Basic-Auth username accepted by the bridge.
    pub username: String,
    /// Basic-Auth password accepted by the bridge.
    pub password: String,
}

impl Default for VirtualBridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1".to_string(),
            port: 56123,
            username: "globo".to_string(),
            password: "globo".to_string(),
        }
    }
}

impl VirtualBridgeConfig {
    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}
