//! gilrs backend (generic HID / DirectInput / evdev pads)

use anyhow::Result;
use gilrs::{Event, EventType, Gamepad, Gilrs};
use tracing::{debug, info};

use super::backend::InputBackend;
use super::buttons::{gilrs_button, GILRS_BUTTONS};
use super::device_id::DeviceId;
use super::state::{Axis, BackendKind, Button, DeviceSnapshot};

/// Hat-as-axis pads report the d-pad on these axes instead of buttons
const DPAD_AXIS_THRESHOLD: f32 = 0.5;

pub struct GilrsBackend {
    gilrs: Gilrs,
}

impl GilrsBackend {
    pub fn new() -> Result<Self> {
        let gilrs =
            Gilrs::new().map_err(|e| anyhow::anyhow!("gilrs initialization failed: {}", e))?;
        debug!("gilrs initialized");
        Ok(Self { gilrs })
    }

    /// Drain pending events so gamepad state is current
    fn pump_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("gilrs gamepad connected: {:?} \"{}\"", id, self.gilrs.gamepad(id).name());
                },
                EventType::Disconnected => info!("gilrs gamepad disconnected: {:?}", id),
                _ => {},
            }
        }
    }
}

impl InputBackend for GilrsBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gilrs
    }

    fn poll(&mut self) -> Vec<DeviceSnapshot> {
        self.pump_events();
        self.gilrs
            .gamepads()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .map(|(id, gamepad)| snapshot_gamepad(DeviceId::from_gilrs(id), &gamepad))
            .collect()
    }
}

/// Read a connected gamepad into a snapshot (sticks inverted so up is negative)
pub fn snapshot_gamepad(id: DeviceId, gamepad: &Gamepad<'_>) -> DeviceSnapshot {
    let mut snapshot = DeviceSnapshot::new(id, gamepad.name(), BackendKind::Gilrs);

    for button in GILRS_BUTTONS {
        if gamepad.is_pressed(button) {
            if let Some(mapped) = gilrs_button(button) {
                snapshot.buttons.insert(mapped);
            }
        }
    }

    let dpad_x = gamepad.value(gilrs::Axis::DPadX);
    let dpad_y = gamepad.value(gilrs::Axis::DPadY);
    if dpad_x > DPAD_AXIS_THRESHOLD {
        snapshot.buttons.insert(Button::DPadRight);
    } else if dpad_x < -DPAD_AXIS_THRESHOLD {
        snapshot.buttons.insert(Button::DPadLeft);
    }
    if dpad_y > DPAD_AXIS_THRESHOLD {
        snapshot.buttons.insert(Button::DPadUp);
    } else if dpad_y < -DPAD_AXIS_THRESHOLD {
        snapshot.buttons.insert(Button::DPadDown);
    }

    let trigger = |button: gilrs::Button| {
        gamepad
            .button_data(button)
            .map(|data| data.value().clamp(0.0, 1.0))
            .unwrap_or(0.0)
    };

    let axes = [
        (Axis::LeftX, gamepad.value(gilrs::Axis::LeftStickX)),
        (Axis::LeftY, -gamepad.value(gilrs::Axis::LeftStickY)),
        (Axis::RightX, gamepad.value(gilrs::Axis::RightStickX)),
        (Axis::RightY, -gamepad.value(gilrs::Axis::RightStickY)),
        (Axis::LeftTrigger, trigger(gilrs::Button::LeftTrigger2)),
        (Axis::RightTrigger, trigger(gilrs::Button::RightTrigger2)),
    ];
    snapshot.axes.extend(axes);
    snapshot
}

/// Whether a gilrs device name identifies an Xbox pad
///
/// On Windows such pads are also visible through XInput.
pub fn is_xbox_name(name: &str) -> bool {
    let name_lower = name.to_lowercase();

    name_lower.contains("xbox")
        || name_lower.contains("xinput")
        || name_lower.contains("x-box")
        || name_lower.contains("microsoft")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_xbox_name() {
        assert!(is_xbox_name("Xbox 360 Controller"));
        assert!(is_xbox_name("Microsoft X-Box One pad"));
        assert!(is_xbox_name("XInput Controller 1"));
        assert!(!is_xbox_name("Sony DualSense"));
        assert!(!is_xbox_name("8BitDo SN30 Pro"));
    }
}
