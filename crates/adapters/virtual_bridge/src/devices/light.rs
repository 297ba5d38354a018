//! Virtual light: `ON`, `OFF`, `POWER`, `DIMM/<value>` and `DISCO`.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Acknowledgement;
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LightMode {
    On,
    Off,
    Dimmed,
}

impl fmt::Display for LightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Dimmed => "DIMMED",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LightState {
    mode: LightMode,
    value: u8,
}

impl LightState {
    const ON: Self = Self {
        mode: LightMode::On,
        value: 100,
    };
    const OFF: Self = Self {
        mode: LightMode::Off,
        value: 0,
    };
}

/// A simulated dimmable light.
pub(crate) struct VirtualLight {
    state: Mutex<LightState>,
}

impl Default for VirtualLight {
    fn default() -> Self {
        Self {
            state: Mutex::new(LightState::OFF),
        }
    }
}

impl VirtualLight {
    /// Status line, e.g. `GloboLightStatus.DIMMED:40`.
    pub(crate) fn status(&self) -> String {
        let state = *self.lock_state();
        format!("GloboLightStatus.{}:{}", state.mode, state.value)
    }

    pub(crate) fn handle_command(
        &self,
        command: &str,
        value: Option<&str>,
    ) -> Result<Acknowledgement, CommandError> {
        let mut state = self.lock_state();
        let target = match command {
            "ON" => LightState::ON,
            "OFF" => LightState::OFF,
            "POWER" => match state.mode {
                LightMode::Off => LightState::ON,
                LightMode::On | LightMode::Dimmed => LightState::OFF,
            },
            "DIMM" => dimm_target(value)?,
            "DISCO" => return Ok(Acknowledgement::Submitted),
            other => {
                return Err(CommandError::UnknownCommand {
                    device: "light",
                    command: other.to_string(),
                });
            }
        };

        if *state == target {
            return Ok(Acknowledgement::Unchanged);
        }
        *state = target;
        Ok(Acknowledgement::Submitted)
    }

    fn lock_state(&self) -> MutexGuard<'_, LightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Dimming to 0 or below switches off, to 100 or above switches fully on.
fn dimm_target(value: Option<&str>) -> Result<LightState, CommandError> {
    let raw = value.ok_or(CommandError::InvalidValue(None))?;
    let parsed: f64 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| CommandError::InvalidValue(Some(raw.to_string())))?;
    let level = parsed.trunc();
    if level <= 0.0 {
        Ok(LightState::OFF)
    } else if level >= 100.0 {
        Ok(LightState::ON)
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = level as u8;
        Ok(LightState {
            mode: LightMode::Dimmed,
            value,
        })
    }
}
