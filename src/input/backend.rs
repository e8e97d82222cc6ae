//! Controller backend abstraction

use super::state::{BackendKind, DeviceSnapshot};

/// A source of controller snapshots
///
/// `poll` is called once per controller tick on the UI thread and must not
/// block. Devices that vanish between polls are simply absent from the next
/// result.
pub trait InputBackend {
    fn kind(&self) -> BackendKind;

    fn poll(&mut self) -> Vec<DeviceSnapshot>;
}
