//! # globo-skill-adapter-virtual-bridge
//!
//! Simulated Globo bridge speaking the same REST protocol as the real one, so
//! the skill adapter can be exercised without the IR hardware.
//!
//! ## Provided devices
//!
//! | Device | Status format | Commands |
//! |--------|---------------|----------|
//! | `light` | `GloboLightStatus.<ON\|OFF\|DIMMED>:<value>` | `ON`, `OFF`, `POWER`, `DIMM/<value>`, `DISCO` |
//! | `fan` | `GloboFanCommand.<OFF\|LOW\|MED\|HIGH>` | `ON`, `OFF`, `LOW`, `MED`, `HIGH` |
//!
//! Every route requires HTTP Basic authentication.
//!
//! ## Dependency rule
//!
//! Stand-alone: speaks only the wire protocol, so it depends on neither the
//! domain nor the app crate.

pub mod auth;
pub mod config;
mod devices;
pub mod error;
pub mod router;

pub use auth::Credentials;
pub use config::VirtualBridgeConfig;
pub use devices::Acknowledgement;
pub use error::CommandError;

use devices::{VirtualFan, VirtualLight};

/// In-memory bridge holding the light and fan state.
pub struct VirtualBridge {
    light: VirtualLight,
    fan: VirtualFan,
    credentials: Credentials,
}

impl VirtualBridge {
    /// Create a bridge with both devices off, guarded by `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            light: VirtualLight::default(),
            fan: VirtualFan::default(),
            credentials,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Raw status string of `device`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownDevice`] for anything but `light` and `fan`.
    pub fn status(&self, device: &str) -> Result<String, CommandError> {
        match device {
            "light" => Ok(self.light.status()),
            "fan" => Ok(self.fan.status()),
            other => Err(CommandError::UnknownDevice(other.to_string())),
        }
    }

    /// Execute `command` (with an optional value) on `device`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownDevice`], [`CommandError::UnknownCommand`]
    /// or [`CommandError::InvalidValue`].
    pub fn execute(
        &self,
        device: &str,
        command: &str,
        value: Option<&str>,
    ) -> Result<Acknowledgement, CommandError> {
        let ack = match device {
            "light" => self.light.handle_command(command, value)?,
            "fan" => self.fan.handle_command(command)?,
            other => return Err(CommandError::UnknownDevice(other.to_string())),
        };
        tracing::info!(device, command, value, ?ack, "virtual bridge command");
        Ok(ack)
    }
}
