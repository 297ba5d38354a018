//! Simulated devices behind the virtual bridge.

mod fan;
mod light;

pub(crate) use fan::VirtualFan;
pub(crate) use light::VirtualLight;

/// Successful outcome of a bridge command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The command changed (or would have changed) the device.
    Submitted,
    /// The device was already in the requested state.
    Unchanged,
}

impl Acknowledgement {
    /// Plain-text body returned to the caller.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Submitted => "Commands were submitted.",
            Self::Unchanged => "Device already in desired state.",
        }
    }
}
