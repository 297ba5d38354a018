//! Device commands: the REST-level intent derived from a directive.
//!
//! [`map_directive`] turns a directive addressed to a device class into an
//! [`Action`]: either a status query or a [`DeviceCommand`] plus the value to
//! echo back in the control response. Percentage payloads are range-checked
//! here, before any bridge traffic happens.

use std::fmt;

use serde_json::Value;

use crate::directive::{Directive, DirectiveName};
use crate::endpoint::DeviceClass;
use crate::error::DirectiveError;

/// An integer percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u8);

impl Percentage {
    /// Returns `None` when `value > 100`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command verb understood by the bridge. Only `DIMM` carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    On,
    Off,
    Dimm(Percentage),
    Low,
    Med,
    High,
}

impl Verb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Dimm(_) => "DIMM",
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }

    #[must_use]
    pub fn value(self) -> Option<Percentage> {
        match self {
            Self::Dimm(level) => Some(level),
            _ => None,
        }
    }
}

/// Map a fan power level onto a discrete speed.
///
/// 33 and 66 belong to the lower bucket.
#[must_use]
pub fn bucket_power_level(level: Percentage) -> Verb {
    match level.value() {
        0 => Verb::Off,
        1..=33 => Verb::Low,
        34..=66 => Verb::Med,
        _ => Verb::High,
    }
}

/// A command addressed to one bridge device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCommand {
    pub device: DeviceClass,
    pub verb: Verb,
}

impl DeviceCommand {
    /// Bridge path: `/{deviceId}/{verb}` or `/{deviceId}/{verb}/{value}`.
    #[must_use]
    pub fn path(&self) -> String {
        match self.verb.value() {
            Some(value) => format!("/{}/{}/{value}", self.device, self.verb.as_str()),
            None => format!("/{}/{}", self.device, self.verb.as_str()),
        }
    }
}

/// HTTP method of a bridge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethod {
    Get,
    Put,
}

impl BridgeMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

/// One request against the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeRequest {
    /// `GET /{deviceId}`: body is the raw status string.
    Status(DeviceClass),
    /// `PUT /{deviceId}/{verb}[/{value}]`: body is ignored.
    Command(DeviceCommand),
}

impl BridgeRequest {
    #[must_use]
    pub fn method(&self) -> BridgeMethod {
        match self {
            Self::Status(_) => BridgeMethod::Get,
            Self::Command(_) => BridgeMethod::Put,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Status(device) => format!("/{device}"),
            Self::Command(command) => command.path(),
        }
    }
}

impl fmt::Display for BridgeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

/// Property echoed back in a control response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// `powerState`; the literal string is preserved as sent by the skill
    /// (turn-off answers `"Off"`).
    PowerState(&'static str),
    Brightness(Percentage),
    PowerLevel(Percentage),
}

impl Echo {
    #[must_use]
    pub fn property_name(self) -> &'static str {
        match self {
            Self::PowerState(_) => "powerState",
            Self::Brightness(_) => "brightness",
            Self::PowerLevel(_) => "powerLevel",
        }
    }

    #[must_use]
    pub fn value(self) -> Value {
        match self {
            Self::PowerState(state) => Value::from(state),
            Self::Brightness(level) | Self::PowerLevel(level) => Value::from(level.value()),
        }
    }
}

/// What the router must do for a non-discovery directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReportState,
    Control { command: DeviceCommand, echo: Echo },
}

impl Action {
    /// The bridge request this action issues.
    #[must_use]
    pub fn request(&self, device: DeviceClass) -> BridgeRequest {
        match self {
            Self::ReportState => BridgeRequest::Status(device),
            Self::Control { command, .. } => BridgeRequest::Command(*command),
        }
    }
}

/// Map a directive addressed to `device` onto an [`Action`].
///
/// # Errors
///
/// - [`DirectiveError::Unsupported`] when the directive name is not handled by
///   the device class.
/// - [`DirectiveError::OutOfRange`] when a percentage lies outside `[0, 100]`.
/// - [`DirectiveError::InvalidValue`] when a percentage is missing or not an
///   integer.
pub fn map_directive(device: DeviceClass, directive: &Directive) -> Result<Action, DirectiveError> {
    let control = |verb, echo| Action::Control {
        command: DeviceCommand { device, verb },
        echo,
    };

    match (device, directive.name()) {
        (_, DirectiveName::ReportState) => Ok(Action::ReportState),
        (DeviceClass::Light, DirectiveName::TurnOn) => Ok(control(Verb::On, Echo::PowerState("ON"))),
        (DeviceClass::Fan, DirectiveName::TurnOn) => Ok(control(Verb::Low, Echo::PowerState("ON"))),
        (_, DirectiveName::TurnOff) => Ok(control(Verb::Off, Echo::PowerState("Off"))),
        (DeviceClass::Light, DirectiveName::SetBrightness) => {
            let level = percentage(directive, "brightness", device)?;
            Ok(control(Verb::Dimm(level), Echo::Brightness(level)))
        }
        (DeviceClass::Fan, DirectiveName::SetPowerLevel) => {
            let level = percentage(directive, "powerLevel", device)?;
            Ok(control(bucket_power_level(level), Echo::PowerLevel(level)))
        }
        (_, name) => Err(DirectiveError::Unsupported {
            name: name.to_string(),
            device,
        }),
    }
}

fn percentage(
    directive: &Directive,
    property: &'static str,
    device: DeviceClass,
) -> Result<Percentage, DirectiveError> {
    let Some(value) = directive.payload_value(property) else {
        return Err(DirectiveError::InvalidValue {
            property,
            value: "undefined".to_string(),
            device,
        });
    };
    let out_of_range = || DirectiveError::OutOfRange {
        property,
        value: value.to_string(),
        device,
    };
    let invalid = || DirectiveError::InvalidValue {
        property,
        value: value.to_string(),
        device,
    };

    let Value::Number(number) = value else {
        return Err(invalid());
    };
    let level = match number.as_i64() {
        Some(level) => level,
        None => {
            // u64 beyond i64 or a float
            let level = number.as_f64().ok_or_else(invalid)?;
            if !(0.0..=100.0).contains(&level) {
                return Err(out_of_range());
            }
            integral(level).ok_or_else(invalid)?
        }
    };

    u8::try_from(level)
        .ok()
        .and_then(Percentage::new)
        .ok_or_else(out_of_range)
}

#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    (value.fract().abs() < f64::EPSILON).then_some(value as i64)
}
