//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `globo-skill.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use serde::Deserialize;

use globo_skill_adapter_bridge_reqwest::{BridgeConfig, BridgeError};
use globo_skill_adapter_virtual_bridge::VirtualBridgeConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Globo bridge connection.
    pub bridge: BridgeConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Embedded virtual bridge.
    pub virtual_bridge: VirtualBridgeConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `globo-skill.toml` (if present), apply
    /// environment-variable overrides and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// bridge cannot be reached with the resulting settings.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("globo-skill.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GLOBO_SKILL_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GLOBO_SKILL_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GLOBO_SKILL_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("BASE_URL") {
            self.bridge.base_url = val;
        }
        if let Some(val) = var("BASIC_AUTH") {
            self.bridge.basic_auth = Some(val);
        }
        if let Some(val) = var("BRIDGE_USERNAME") {
            self.bridge.username = Some(val);
        }
        if let Some(val) = var("BRIDGE_PASSWORD") {
            self.bridge.password = Some(val);
        }
        if let Some(val) = var("GLOBO_SKILL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.virtual_bridge.enabled && self.virtual_bridge.port == 0 {
            return Err(ConfigError::Validation(
                "virtual bridge port must be non-zero".to_string(),
            ));
        }
        self.bridge_config().validate()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Bridge settings handed to the client.
    ///
    /// With the virtual bridge enabled, the base URL and credential point at
    /// it; the timeouts still come from `[bridge]`.
    #[must_use]
    pub fn bridge_config(&self) -> BridgeConfig {
        if !self.virtual_bridge.enabled {
            return self.bridge.clone();
        }
        BridgeConfig {
            base_url: format!("http://{}", self.virtual_bridge.bind_addr()),
            basic_auth: Some(self.virtual_bridge.credentials().authorization()),
            username: None,
            password: None,
            ..self.bridge.clone()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "globo_skilld=info,globo_skill=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// Bridge settings cannot produce a client.
    #[error("invalid bridge configuration")]
    Bridge(#[from] BridgeError),
}
