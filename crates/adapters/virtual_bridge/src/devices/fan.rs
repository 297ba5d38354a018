//! Virtual fan with three speeds.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Acknowledgement;
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FanSpeed {
    Off,
    Low,
    Med,
    High,
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "OFF",
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        })
    }
}

/// A simulated ceiling fan.
pub(crate) struct VirtualFan {
    speed: Mutex<FanSpeed>,
}

impl Default for VirtualFan {
    fn default() -> Self {
        Self {
            speed: Mutex::new(FanSpeed::Off),
        }
    }
}

impl VirtualFan {
    /// Status line, e.g. `GloboFanCommand.MED`.
    pub(crate) fn status(&self) -> String {
        format!("GloboFanCommand.{}", *self.lock_speed())
    }

    /// `ON` starts the fan at the lowest speed.
    pub(crate) fn handle_command(&self, command: &str) -> Result<Acknowledgement, CommandError> {
        let target = match command {
            "ON" | "LOW" => FanSpeed::Low,
            "MED" => FanSpeed::Med,
            "HIGH" => FanSpeed::High,
            "OFF" => FanSpeed::Off,
            other => {
                return Err(CommandError::UnknownCommand {
                    device: "fan",
                    command: other.to_string(),
                });
            }
        };

        let mut speed = self.lock_speed();
        if *speed == target {
            return Ok(Acknowledgement::Unchanged);
        }
        *speed = target;
        Ok(Acknowledgement::Submitted)
    }

    fn lock_speed(&self) -> MutexGuard<'_, FanSpeed> {
        self.speed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
