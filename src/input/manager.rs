//! Controller manager: polls every backend and folds the result into one state
//!
//! Per poll:
//! 1. Each backend reports its connected devices.
//! 2. gilrs devices that name an Xbox pad are dropped when XInput sees a pad
//!    (on Windows the same pad is visible through both APIs).
//! 3. Sticks get a radial deadzone, triggers a one-dimensional one.
//! 4. Devices merge into one [`ControllerState`].
//! 5. Logical controls are derived and debounced into activation events.
//!
//! While suppressed the backends are still polled and the debouncer still sees
//! every poll, so a control held across the end of suppression only fires on
//! its next physical press.

use tracing::{debug, info, trace, warn};

use super::backend::InputBackend;
use super::debounce::Debouncer;
use super::device_id::DeviceId;
use super::gilrs_backend::{is_xbox_name, GilrsBackend};
use super::nav::{active_controls, LogicalControl};
use super::normalize::{apply_deadzone, apply_radial_deadzone};
use super::state::{Axis, BackendKind, ControllerState, DeviceSnapshot};
use super::xinput_backend::XInputBackend;
use crate::config::{ControllerType, InputConfig};

/// Result of one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollOutcome {
    pub state: ControllerState,
    /// Controls that went from released to held on this poll
    pub events: Vec<LogicalControl>,
}

pub struct ControllerManager {
    backends: Vec<Box<dyn InputBackend>>,
    deadzone: f32,
    stick_threshold: f32,
    debouncer: Debouncer,
    suppressed: bool,
    state: ControllerState,
    known_devices: Vec<DeviceId>,
    connected: Option<BackendKind>,
}

impl ControllerManager {
    /// Create the backends selected by `preference`
    ///
    /// A backend that fails to initialize is left out and logged; the
    /// manager then works with whatever is left, possibly nothing.
    pub fn new(preference: ControllerType, input: &InputConfig) -> Self {
        let mut backends: Vec<Box<dyn InputBackend>> = Vec::new();

        if preference.uses_xinput() {
            match XInputBackend::new() {
                Ok(backend) => backends.push(Box::new(backend)),
                Err(e) => warn!("XInput backend unavailable: {:#}", e),
            }
        }

        if preference.uses_gilrs() {
            match GilrsBackend::new() {
                Ok(backend) => backends.push(Box::new(backend)),
                Err(e) => warn!("gilrs backend unavailable: {:#}", e),
            }
        }

        info!(
            "Controller manager started (preference: {:?}, backends: {})",
            preference,
            backends
                .iter()
                .map(|b| b.kind().as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self::with_backends(backends, input)
    }

    pub fn with_backends(backends: Vec<Box<dyn InputBackend>>, input: &InputConfig) -> Self {
        Self {
            backends,
            deadzone: input.deadzone,
            stick_threshold: input.stick_threshold,
            debouncer: Debouncer::new(),
            suppressed: false,
            state: ControllerState::default(),
            known_devices: Vec::new(),
            connected: None,
        }
    }

    pub fn poll(&mut self) -> PollOutcome {
        let mut devices: Vec<DeviceSnapshot> = Vec::new();
        for backend in &mut self.backends {
            devices.extend(backend.poll());
        }

        let xinput_present = devices.iter().any(|d| d.info.backend == BackendKind::XInput);

        let mut merged = ControllerState::default();
        for device in devices {
            if xinput_present
                && device.info.backend == BackendKind::Gilrs
                && is_xbox_name(&device.info.name)
            {
                trace!("Skipping gilrs view of Xbox pad: {}", device.info.name);
                continue;
            }
            merged.merge(self.filter_device(device));
        }

        self.track_connections(&merged);
        self.connected = merged.primary_backend();

        let active = active_controls(&merged, self.stick_threshold);
        let events = self.debouncer.update(&active);

        if self.suppressed {
            if !events.is_empty() {
                trace!("Discarding {} control(s) while suppressed", events.len());
            }
            self.state = ControllerState::default();
            return PollOutcome::default();
        }

        for event in &events {
            debug!("Controller: {}", event);
        }

        self.state = merged.clone();
        PollOutcome {
            state: merged,
            events,
        }
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        if self.suppressed != suppressed {
            info!(
                "Controller input {}",
                if suppressed { "suppressed" } else { "resumed" }
            );
            self.suppressed = suppressed;
            if suppressed {
                self.state = ControllerState::default();
            }
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Backend of the first device seen on the last poll, suppressed or not
    pub fn connected_backend(&self) -> Option<BackendKind> {
        self.connected
    }

    /// State published by the last poll (empty while suppressed)
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    fn filter_device(&self, mut device: DeviceSnapshot) -> DeviceSnapshot {
        let dz = self.deadzone;

        let (lx, ly) = apply_radial_deadzone(device.axis(Axis::LeftX), device.axis(Axis::LeftY), dz);
        let (rx, ry) =
            apply_radial_deadzone(device.axis(Axis::RightX), device.axis(Axis::RightY), dz);
        let lt = apply_deadzone(device.axis(Axis::LeftTrigger), dz);
        let rt = apply_deadzone(device.axis(Axis::RightTrigger), dz);

        device.axes.extend([
            (Axis::LeftX, lx),
            (Axis::LeftY, ly),
            (Axis::RightX, rx),
            (Axis::RightY, ry),
            (Axis::LeftTrigger, lt),
            (Axis::RightTrigger, rt),
        ]);
        device
    }

    fn track_connections(&mut self, merged: &ControllerState) {
        let current: Vec<DeviceId> = merged.devices.iter().map(|d| d.id).collect();
        if current == self.known_devices {
            return;
        }

        if current.is_empty() {
            info!("No controller connected");
        } else {
            for device in &merged.devices {
                if !self.known_devices.contains(&device.id) {
                    info!(
                        "Controller active: {} \"{}\" via {}",
                        device.id, device.name, device.backend
                    );
                }
            }
        }
        self.known_devices = current;
    }
}
