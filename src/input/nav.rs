//! Logical navigation controls derived from controller state

use std::collections::BTreeSet;
use std::fmt;

use super::state::{Axis, Button, ControllerState};

/// What the launcher reacts to, independent of the physical input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalControl {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Start,
    Back,
}

impl LogicalControl {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalControl::Up => "up",
            LogicalControl::Down => "down",
            LogicalControl::Left => "left",
            LogicalControl::Right => "right",
            LogicalControl::Confirm => "confirm",
            LogicalControl::Cancel => "cancel",
            LogicalControl::Start => "start",
            LogicalControl::Back => "back",
        }
    }
}

impl fmt::Display for LogicalControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controls held in `state`
///
/// Directions come from the d-pad or the left stick past `stick_threshold`
/// (strictly); the stick's Y axis is negative when pushed up.
pub fn active_controls(state: &ControllerState, stick_threshold: f32) -> BTreeSet<LogicalControl> {
    let x = state.axis(Axis::LeftX);
    let y = state.axis(Axis::LeftY);

    let checks = [
        (LogicalControl::Up, state.is_pressed(Button::DPadUp) || y < -stick_threshold),
        (LogicalControl::Down, state.is_pressed(Button::DPadDown) || y > stick_threshold),
        (LogicalControl::Left, state.is_pressed(Button::DPadLeft) || x < -stick_threshold),
        (LogicalControl::Right, state.is_pressed(Button::DPadRight) || x > stick_threshold),
        (LogicalControl::Confirm, state.is_pressed(Button::A)),
        (LogicalControl::Cancel, state.is_pressed(Button::B)),
        (LogicalControl::Start, state.is_pressed(Button::Start)),
        (LogicalControl::Back, state.is_pressed(Button::Back)),
    ];

    checks
        .into_iter()
        .filter(|(_, active)| *active)
        .map(|(control, _)| control)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpad_and_buttons() {
        let mut state = ControllerState::default();
        state.buttons.insert(Button::DPadUp);
        state.buttons.insert(Button::A);
        state.buttons.insert(Button::Back);

        let active = active_controls(&state, 0.5);
        let expected: BTreeSet<_> =
            [LogicalControl::Up, LogicalControl::Confirm, LogicalControl::Back].into();
        assert_eq!(active, expected);
    }

    #[test]
    fn test_stick_threshold_is_strict() {
        let mut state = ControllerState::default();
        state.axes.insert(Axis::LeftY, -0.5);
        state.axes.insert(Axis::LeftX, 0.51);

        let active = active_controls(&state, 0.5);
        assert!(!active.contains(&LogicalControl::Up));
        assert!(active.contains(&LogicalControl::Right));
    }

    #[test]
    fn test_stick_up_is_negative() {
        let mut state = ControllerState::default();
        state.axes.insert(Axis::LeftY, -0.9);
        let active = active_controls(&state, 0.5);
        assert!(active.contains(&LogicalControl::Up));
        assert!(!active.contains(&LogicalControl::Down));
    }

    #[test]
    fn test_right_stick_ignored() {
        let mut state = ControllerState::default();
        state.axes.insert(Axis::RightY, -1.0);
        assert!(active_controls(&state, 0.5).is_empty());
    }
}
