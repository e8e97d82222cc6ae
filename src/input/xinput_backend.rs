//! XInput backend (Windows only)
//!
//! Polls the four XInput user slots directly. Connected slots are read every
//! poll; empty slots are re-probed on a slower interval because querying a
//! disconnected slot is expensive on some drivers.

pub use platform::XInputBackend;

/// Interval between probes of disconnected slots
pub const RECONNECT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(2);

#[cfg(windows)]
mod platform {
    use anyhow::Result;
    use rusty_xinput::{XInputHandle, XInputState, XInputUsageError};
    use std::time::Instant;
    use tracing::{debug, info, trace};

    use super::RECONNECT_INTERVAL;
    use crate::input::backend::InputBackend;
    use crate::input::state::{BackendKind, DeviceSnapshot};
    use crate::input::xinput_convert::XInputPad;

    const SLOTS: usize = 4;

    pub struct XInputBackend {
        handle: XInputHandle,
        connected: [bool; SLOTS],
        last_probe: Option<Instant>,
    }

    impl XInputBackend {
        pub fn new() -> Result<Self> {
            let handle = XInputHandle::load_default()
                .map_err(|e| anyhow::anyhow!("XInput library not available: {:?}", e))?;
            debug!("XInput initialized successfully");
            Ok(Self {
                handle,
                connected: [false; SLOTS],
                last_probe: None,
            })
        }

        /// Read every slot regardless of the probe interval
        pub fn scan(&mut self) -> Vec<DeviceSnapshot> {
            self.last_probe = None;
            self.poll_slots()
        }

        fn poll_slots(&mut self) -> Vec<DeviceSnapshot> {
            let probe_due = self
                .last_probe
                .map_or(true, |at| at.elapsed() >= RECONNECT_INTERVAL);
            if probe_due {
                self.last_probe = Some(Instant::now());
            }

            let mut snapshots = Vec::new();
            for slot in 0..SLOTS {
                if !self.connected[slot] && !probe_due {
                    continue;
                }

                match self.handle.get_state(slot as u32) {
                    Ok(state) => {
                        if !self.connected[slot] {
                            info!("XInput controller {} connected", slot);
                            self.connected[slot] = true;
                        }
                        snapshots.push(pad_from_state(&state).to_snapshot(slot));
                    },
                    Err(XInputUsageError::DeviceNotConnected) => {
                        if self.connected[slot] {
                            info!("XInput controller {} disconnected", slot);
                            self.connected[slot] = false;
                        }
                    },
                    Err(e) => {
                        trace!("XInput slot {} query failed: {:?}", slot, e);
                        self.connected[slot] = false;
                    },
                }
            }
            snapshots
        }
    }

    impl InputBackend for XInputBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::XInput
        }

        fn poll(&mut self) -> Vec<DeviceSnapshot> {
            self.poll_slots()
        }
    }

    fn pad_from_state(state: &XInputState) -> XInputPad {
        let gamepad = &state.raw.Gamepad;
        XInputPad {
            buttons: gamepad.wButtons,
            left_trigger: state.left_trigger(),
            right_trigger: state.right_trigger(),
            thumb_lx: gamepad.sThumbLX,
            thumb_ly: gamepad.sThumbLY,
            thumb_rx: gamepad.sThumbRX,
            thumb_ry: gamepad.sThumbRY,
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use anyhow::Result;

    use crate::input::backend::InputBackend;
    use crate::input::state::{BackendKind, DeviceSnapshot};

    /// Placeholder; construction always fails off Windows
    pub struct XInputBackend {
        _private: (),
    }

    impl XInputBackend {
        pub fn new() -> Result<Self> {
            anyhow::bail!("XInput is only available on Windows")
        }

        pub fn scan(&mut self) -> Vec<DeviceSnapshot> {
            Vec::new()
        }
    }

    impl InputBackend for XInputBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::XInput
        }

        fn poll(&mut self) -> Vec<DeviceSnapshot> {
            Vec::new()
        }
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_off_windows() {
        assert!(XInputBackend::new().is_err());
    }
}
