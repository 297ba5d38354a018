//! Status translation: raw bridge status strings into reportable properties.
//!
//! Light: `GloboLightStatus.<ON|DIMMED|OFF>:<brightness>`, brightness passed
//! through verbatim. Fan: `GloboFanCommand.<OFF|LOW|MED|HIGH>`.

use crate::endpoint::DeviceClass;

/// Power state reported through `Alexa.PowerController`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// Why a status string could not be translated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusParseError {
    #[error("Could not map value '{0}' for globo light.")]
    UnknownLightStatus(String),

    #[error("Could not map value '{0}' for globo fan.")]
    UnknownFanStatus(String),
}

/// Translated device state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Light {
        power: PowerState,
        brightness: String,
    },
    Fan {
        power: PowerState,
        power_level: &'static str,
    },
}

impl DeviceState {
    #[must_use]
    pub fn power(&self) -> PowerState {
        match self {
            Self::Light { power, .. } | Self::Fan { power, .. } => *power,
        }
    }
}

/// Translate the raw status body of `device`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`StatusParseError`] when the category is not one the bridge is
/// known to emit, or the light status lacks its brightness field.
pub fn translate(device: DeviceClass, raw: &str) -> Result<DeviceState, StatusParseError> {
    match device {
        DeviceClass::Light => parse_light(raw.trim()),
        DeviceClass::Fan => parse_fan(raw.trim()),
    }
}

fn parse_light(raw: &str) -> Result<DeviceState, StatusParseError> {
    let unknown = || StatusParseError::UnknownLightStatus(raw.to_string());
    let (category, brightness) = raw.split_once(':').ok_or_else(unknown)?;
    let power = match category {
        "GloboLightStatus.ON" | "GloboLightStatus.DIMMED" => PowerState::On,
        "GloboLightStatus.OFF" => PowerState::Off,
        _ => return Err(unknown()),
    };
    Ok(DeviceState::Light {
        power,
        brightness: brightness.to_string(),
    })
}

fn parse_fan(raw: &str) -> Result<DeviceState, StatusParseError> {
    let (power, power_level) = match raw {
        "GloboFanCommand.OFF" => (PowerState::Off, "0"),
        "GloboFanCommand.LOW" => (PowerState::On, "33"),
        "GloboFanCommand.MED" => (PowerState::On, "66"),
        "GloboFanCommand.HIGH" => (PowerState::On, "100"),
        _ => return Err(StatusParseError::UnknownFanStatus(raw.to_string())),
    };
    Ok(DeviceState::Fan { power, power_level })
}
