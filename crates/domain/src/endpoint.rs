//! Endpoint: a logical device exposed to the assistant.
//!
//! The catalog is static: exactly one light and one fan, both driven by the
//! same Globo bridge. `endpoint_id` is the only key accepted from directives;
//! `device_id` is the path segment the bridge knows the device by.

use std::fmt;

/// Device class behind an endpoint. Selects the directive handler and the
/// status format spoken by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Light,
    Fan,
}

impl DeviceClass {
    /// Bridge-side device id (`/light`, `/fan`).
    #[must_use]
    pub fn device_id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.device_id())
    }
}

/// A reportable/controllable property surface declared during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// Interface name, e.g. `Alexa.PowerController`.
    pub interface: &'static str,
    /// Property exposed by the interface, if any.
    pub property: Option<&'static str>,
}

impl Capability {
    const fn interface(interface: &'static str) -> Self {
        Self {
            interface,
            property: None,
        }
    }

    const fn property(interface: &'static str, property: &'static str) -> Self {
        Self {
            interface,
            property: Some(property),
        }
    }
}

/// Interface names used by both the catalog and reported properties.
pub mod interface {
    pub const ALEXA: &str = "Alexa";
    pub const ENDPOINT_HEALTH: &str = "Alexa.EndpointHealth";
    pub const POWER_CONTROLLER: &str = "Alexa.PowerController";
    pub const BRIGHTNESS_CONTROLLER: &str = "Alexa.BrightnessController";
    pub const POWER_LEVEL_CONTROLLER: &str = "Alexa.PowerLevelController";
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub endpoint_id: &'static str,
    pub class: DeviceClass,
    /// Name the assistant uses for voice control.
    pub display_name: &'static str,
    pub categories: &'static [&'static str],
    pub capabilities: &'static [Capability],
}

impl Endpoint {
    /// Bridge-side device id.
    #[must_use]
    pub fn device_id(&self) -> &'static str {
        self.class.device_id()
    }
}

/// Description shared by every discovered endpoint.
pub const DESCRIPTION: &str = "Globo Lighting Fabiola 0306";
/// Manufacturer shared by every discovered endpoint.
pub const MANUFACTURER: &str = "Globo Fan Remote by DirtyDan";

pub const LIGHT: Endpoint = Endpoint {
    endpoint_id: "light-v3",
    class: DeviceClass::Light,
    display_name: "Deckenlicht",
    categories: &["LIGHT"],
    capabilities: &[
        Capability::interface(interface::ALEXA),
        Capability::property(interface::ENDPOINT_HEALTH, "connectivity"),
        Capability::property(interface::POWER_CONTROLLER, "powerState"),
        Capability::property(interface::BRIGHTNESS_CONTROLLER, "brightness"),
    ],
};

pub const FAN: Endpoint = Endpoint {
    endpoint_id: "fan-v3",
    class: DeviceClass::Fan,
    display_name: "Ventilator",
    categories: &["SWITCH", "FAN"],
    capabilities: &[
        Capability::interface(interface::ALEXA),
        Capability::property(interface::ENDPOINT_HEALTH, "connectivity"),
        Capability::property(interface::POWER_CONTROLLER, "powerState"),
        Capability::property(interface::POWER_LEVEL_CONTROLLER, "powerLevel"),
    ],
};

/// Every endpoint this deployment exposes, in discovery order.
pub const CATALOG: [Endpoint; 2] = [LIGHT, FAN];

/// Look up a catalog entry by the endpoint id used in directives.
#[must_use]
pub fn resolve(endpoint_id: &str) -> Option<&'static Endpoint> {
    CATALOG.iter().find(|e| e.endpoint_id == endpoint_id)
}
