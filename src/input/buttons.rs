//! Button mapping from backend codes to [`Button`]
//!
//! gilrs reports face buttons by physical position. XDash targets Xbox-style
//! pads, so positions map onto Xbox names:
//!
//! ```text
//!       [Y/North]
//!   [X/West] [B/East]
//!       [A/South]
//! ```
//!
//! XInput reports a bit mask; the flag table follows the XInput API header.

use std::collections::BTreeSet;

use super::state::Button;

/// XInput button bit flags
///
/// rusty_xinput doesn't export individual button constants.
pub mod xinput_flags {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;
}

const XINPUT_BUTTONS: [(u16, Button); 14] = [
    (xinput_flags::A, Button::A),
    (xinput_flags::B, Button::B),
    (xinput_flags::X, Button::X),
    (xinput_flags::Y, Button::Y),
    (xinput_flags::START, Button::Start),
    (xinput_flags::BACK, Button::Back),
    (xinput_flags::LEFT_SHOULDER, Button::LeftShoulder),
    (xinput_flags::RIGHT_SHOULDER, Button::RightShoulder),
    (xinput_flags::LEFT_THUMB, Button::LeftStick),
    (xinput_flags::RIGHT_THUMB, Button::RightStick),
    (xinput_flags::DPAD_UP, Button::DPadUp),
    (xinput_flags::DPAD_DOWN, Button::DPadDown),
    (xinput_flags::DPAD_LEFT, Button::DPadLeft),
    (xinput_flags::DPAD_RIGHT, Button::DPadRight),
];

/// Decode an XInput `wButtons` mask
pub fn buttons_from_xinput_mask(mask: u16) -> BTreeSet<Button> {
    XINPUT_BUTTONS
        .iter()
        .filter(|(flag, _)| mask & flag != 0)
        .map(|&(_, button)| button)
        .collect()
}

/// Map a gilrs button to its Xbox-style name
///
/// Triggers are read as axes, so `LeftTrigger2`/`RightTrigger2` return `None`
/// along with buttons an Xbox pad doesn't have.
pub fn gilrs_button(button: gilrs::Button) -> Option<Button> {
    use gilrs::Button as G;

    match button {
        G::South => Some(Button::A),
        G::East => Some(Button::B),
        G::West => Some(Button::X),
        G::North => Some(Button::Y),

        G::LeftTrigger => Some(Button::LeftShoulder),
        G::RightTrigger => Some(Button::RightShoulder),

        G::Select => Some(Button::Back),
        G::Start => Some(Button::Start),
        G::Mode => Some(Button::Guide),

        G::LeftThumb => Some(Button::LeftStick),
        G::RightThumb => Some(Button::RightStick),

        G::DPadUp => Some(Button::DPadUp),
        G::DPadDown => Some(Button::DPadDown),
        G::DPadLeft => Some(Button::DPadLeft),
        G::DPadRight => Some(Button::DPadRight),

        _ => None,
    }
}

/// gilrs buttons read when taking a snapshot
pub const GILRS_BUTTONS: [gilrs::Button; 15] = [
    gilrs::Button::South,
    gilrs::Button::East,
    gilrs::Button::West,
    gilrs::Button::North,
    gilrs::Button::LeftTrigger,
    gilrs::Button::RightTrigger,
    gilrs::Button::Select,
    gilrs::Button::Start,
    gilrs::Button::Mode,
    gilrs::Button::LeftThumb,
    gilrs::Button::RightThumb,
    gilrs::Button::DPadUp,
    gilrs::Button::DPadDown,
    gilrs::Button::DPadLeft,
    gilrs::Button::DPadRight,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_button_mapping_xbox_layout() {
        assert_eq!(gilrs_button(gilrs::Button::South), Some(Button::A));
        assert_eq!(gilrs_button(gilrs::Button::East), Some(Button::B));
        assert_eq!(gilrs_button(gilrs::Button::West), Some(Button::X));
        assert_eq!(gilrs_button(gilrs::Button::North), Some(Button::Y));
    }

    #[test]
    fn test_menu_and_trigger_buttons() {
        assert_eq!(gilrs_button(gilrs::Button::Select), Some(Button::Back));
        assert_eq!(gilrs_button(gilrs::Button::Start), Some(Button::Start));
        assert_eq!(gilrs_button(gilrs::Button::LeftTrigger2), None);
        assert_eq!(gilrs_button(gilrs::Button::C), None);
    }

    #[test]
    fn test_every_snapshot_button_maps() {
        let mapped: BTreeSet<_> = GILRS_BUTTONS.iter().filter_map(|b| gilrs_button(*b)).collect();
        assert_eq!(mapped.len(), Button::ALL.len());
    }

    #[test]
    fn test_xinput_mask() {
        assert!(buttons_from_xinput_mask(0).is_empty());

        let pressed = buttons_from_xinput_mask(xinput_flags::A | xinput_flags::DPAD_UP);
        assert_eq!(pressed.len(), 2);
        assert!(pressed.contains(&Button::A));
        assert!(pressed.contains(&Button::DPadUp));

        let all = buttons_from_xinput_mask(0xF3FF);
        assert_eq!(all.len(), 14);
        assert!(!all.contains(&Button::Guide));
    }
}
