//! Device-agnostic controller state
//!
//! Every backend reports devices as [`DeviceSnapshot`]s using the names
//! below; the manager folds them into one [`ControllerState`] per poll.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::device_id::DeviceId;

/// Buttons, named after the Xbox layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    Guide,
    LeftShoulder,
    RightShoulder,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    pub const ALL: [Button; 15] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Start,
        Button::Back,
        Button::Guide,
        Button::LeftShoulder,
        Button::RightShoulder,
        Button::LeftStick,
        Button::RightStick,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::Start => "start",
            Button::Back => "back",
            Button::Guide => "guide",
            Button::LeftShoulder => "leftshoulder",
            Button::RightShoulder => "rightshoulder",
            Button::LeftStick => "leftstick",
            Button::RightStick => "rightstick",
            Button::DPadUp => "dpup",
            Button::DPadDown => "dpdown",
            Button::DPadLeft => "dpleft",
            Button::DPadRight => "dpright",
        }
    }
}

/// Analog axes. Sticks are in [-1, 1] with up negative, triggers in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::LeftX,
        Axis::LeftY,
        Axis::RightX,
        Axis::RightY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::LeftX => "leftx",
            Axis::LeftY => "lefty",
            Axis::RightX => "rightx",
            Axis::RightY => "righty",
            Axis::LeftTrigger => "lefttrigger",
            Axis::RightTrigger => "righttrigger",
        }
    }
}

/// Controller API a device was read through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    XInput,
    Gilrs,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::XInput => "xinput",
            BackendKind::Gilrs => "gilrs",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String,
    pub backend: BackendKind,
}

/// One device's inputs at poll time, before deadzone filtering
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub info: DeviceInfo,
    pub buttons: BTreeSet<Button>,
    pub axes: BTreeMap<Axis, f32>,
}

impl DeviceSnapshot {
    pub fn new(id: DeviceId, name: impl Into<String>, backend: BackendKind) -> Self {
        Self {
            info: DeviceInfo {
                id,
                name: name.into(),
                backend,
            },
            buttons: BTreeSet::new(),
            axes: BTreeMap::new(),
        }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }
}

/// Merged state of every contributing device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    pub devices: Vec<DeviceInfo>,
    pub buttons: BTreeSet<Button>,
    pub axes: BTreeMap<Axis, f32>,
}

impl ControllerState {
    pub fn is_connected(&self) -> bool {
        !self.devices.is_empty()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons.contains(&button)
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// Backend of the first contributing device
    pub fn primary_backend(&self) -> Option<BackendKind> {
        self.devices.first().map(|d| d.backend)
    }

    /// Fold a device in: buttons OR together, the larger magnitude wins per axis
    pub fn merge(&mut self, device: DeviceSnapshot) {
        self.buttons.extend(device.buttons);
        for (axis, value) in device.axes {
            let slot = self.axes.entry(axis).or_insert(0.0);
            if value.abs() > slot.abs() {
                *slot = value;
            }
        }
        self.devices.push(device.info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(slot: usize) -> DeviceSnapshot {
        DeviceSnapshot::new(DeviceId::XInput(slot), format!("Pad {slot}"), BackendKind::XInput)
    }

    #[test]
    fn test_empty_state() {
        let state = ControllerState::default();
        assert!(!state.is_connected());
        assert_eq!(state.axis(Axis::LeftX), 0.0);
        assert_eq!(state.primary_backend(), None);
    }

    #[test]
    fn test_merge_ors_buttons() {
        let mut a = device(0);
        a.buttons.insert(Button::A);
        let mut b = device(1);
        b.buttons.insert(Button::Start);

        let mut state = ControllerState::default();
        state.merge(a);
        state.merge(b);

        assert!(state.is_pressed(Button::A));
        assert!(state.is_pressed(Button::Start));
        assert!(!state.is_pressed(Button::B));
        assert_eq!(state.devices.len(), 2);
    }

    #[test]
    fn test_merge_larger_magnitude_wins() {
        let mut a = device(0);
        a.axes.insert(Axis::LeftY, -0.3);
        a.axes.insert(Axis::LeftX, 0.9);
        let mut b = device(1);
        b.axes.insert(Axis::LeftY, 0.8);
        b.axes.insert(Axis::LeftX, -0.1);

        let mut state = ControllerState::default();
        state.merge(a);
        state.merge(b);

        assert_eq!(state.axis(Axis::LeftY), 0.8);
        assert_eq!(state.axis(Axis::LeftX), 0.9);
    }

    #[test]
    fn test_names() {
        assert_eq!(Button::DPadUp.as_str(), "dpup");
        assert_eq!(Axis::RightTrigger.as_str(), "righttrigger");
        assert_eq!(BackendKind::XInput.to_string(), "xinput");
    }
}
