//! Controller identification across backends

use std::fmt;

/// Identifies one physical device as seen through a backend
///
/// The same Xbox pad on Windows shows up once per backend; deduplication
/// happens in the manager by name, not by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeviceId {
    /// gilrs gamepad index
    Gilrs(usize),
    /// XInput user slot (0-3)
    XInput(usize),
}

impl DeviceId {
    pub fn from_gilrs(id: gilrs::GamepadId) -> Self {
        Self::Gilrs(usize::from(id))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gilrs(id) => write!(f, "gilrs:{}", id),
            Self::XInput(slot) => write!(f, "xinput:{}", slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DeviceId::Gilrs(0).to_string(), "gilrs:0");
        assert_eq!(DeviceId::XInput(2).to_string(), "xinput:2");
    }

    #[test]
    fn test_equality() {
        assert_eq!(DeviceId::XInput(0), DeviceId::XInput(0));
        assert_ne!(DeviceId::XInput(0), DeviceId::XInput(1));
        assert_ne!(DeviceId::XInput(0), DeviceId::Gilrs(0));
    }
}
