//! Controller input
//!
//! Two backends feed one device-agnostic state: XInput on Windows and gilrs
//! everywhere. The [`ControllerManager`] merges them and turns held inputs
//! into debounced [`LogicalControl`] events for the launcher.

pub mod backend;
pub mod buttons;
pub mod debounce;
pub mod device_id;
pub mod diagnostics;
pub mod gilrs_backend;
pub mod manager;
pub mod nav;
pub mod normalize;
pub mod state;
pub mod xinput_backend;
pub mod xinput_convert;

pub use backend::InputBackend;
pub use device_id::DeviceId;
pub use diagnostics::print_controller_diagnostics;
pub use manager::{ControllerManager, PollOutcome};
pub use nav::LogicalControl;
pub use state::{Axis, BackendKind, Button, ControllerState, DeviceSnapshot};
