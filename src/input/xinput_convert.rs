//! XInput pad state to [`DeviceSnapshot`] conversion
//!
//! Kept free of the XInput bindings so it builds and tests on every platform.

use super::buttons::buttons_from_xinput_mask;
use super::device_id::DeviceId;
use super::normalize::{axis_from_i16, normalize_trigger};
use super::state::{Axis, BackendKind, DeviceSnapshot};

/// Raw `XINPUT_GAMEPAD` fields of one slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XInputPad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl XInputPad {
    /// Convert to a snapshot; XInput Y points up, so it is inverted here
    pub fn to_snapshot(&self, slot: usize) -> DeviceSnapshot {
        let mut snapshot = DeviceSnapshot::new(
            DeviceId::XInput(slot),
            format!("XInput Controller {}", slot + 1),
            BackendKind::XInput,
        );
        snapshot.buttons = buttons_from_xinput_mask(self.buttons);

        let axes = [
            (Axis::LeftX, axis_from_i16(self.thumb_lx)),
            (Axis::LeftY, -axis_from_i16(self.thumb_ly)),
            (Axis::RightX, axis_from_i16(self.thumb_rx)),
            (Axis::RightY, -axis_from_i16(self.thumb_ry)),
            (Axis::LeftTrigger, normalize_trigger(self.left_trigger)),
            (Axis::RightTrigger, normalize_trigger(self.right_trigger)),
        ];
        snapshot.axes.extend(axes);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::buttons::xinput_flags;
    use crate::input::state::Button;

    #[test]
    fn test_snapshot_identity() {
        let snapshot = XInputPad::default().to_snapshot(1);
        assert_eq!(snapshot.info.id, DeviceId::XInput(1));
        assert_eq!(snapshot.info.name, "XInput Controller 2");
        assert_eq!(snapshot.info.backend, BackendKind::XInput);
        assert!(snapshot.buttons.is_empty());
        assert_eq!(snapshot.axis(Axis::LeftY), 0.0);
    }

    #[test]
    fn test_y_inverted() {
        let pad = XInputPad {
            thumb_ly: i16::MAX,
            thumb_ry: i16::MIN,
            ..Default::default()
        };
        let snapshot = pad.to_snapshot(0);
        assert!(snapshot.axis(Axis::LeftY) < -0.99);
        assert_eq!(snapshot.axis(Axis::RightY), 1.0);
    }

    #[test]
    fn test_buttons_and_triggers() {
        let pad = XInputPad {
            buttons: xinput_flags::START | xinput_flags::B,
            left_trigger: 20,
            right_trigger: 255,
            ..Default::default()
        };
        let snapshot = pad.to_snapshot(0);
        assert!(snapshot.buttons.contains(&Button::Start));
        assert!(snapshot.buttons.contains(&Button::B));
        assert_eq!(snapshot.axis(Axis::LeftTrigger), 0.0);
        assert_eq!(snapshot.axis(Axis::RightTrigger), 1.0);
    }
}
