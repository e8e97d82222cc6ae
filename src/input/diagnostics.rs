//! Controller diagnostics for `--list-controllers`

use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use super::backend::InputBackend;
use super::gilrs_backend::GilrsBackend;
use super::state::{Axis, DeviceSnapshot};
use super::xinput_backend::XInputBackend;

/// Time given to Bluetooth pads to show up before listing
const SCAN_DURATION: Duration = Duration::from_secs(3);

/// Print every controller both backends can see, with current inputs
pub fn print_controller_diagnostics() {
    info!("=== Controller Diagnostics ===");
    info!("Platform: {}", std::env::consts::OS);

    let mut xinput = match XInputBackend::new() {
        Ok(backend) => {
            info!("✅ XInput available");
            Some(backend)
        },
        Err(e) => {
            info!("❌ XInput unavailable: {:#}", e);
            None
        },
    };

    let mut gilrs = match GilrsBackend::new() {
        Ok(backend) => {
            info!("✅ gilrs initialized");
            Some(backend)
        },
        Err(e) => {
            info!("❌ gilrs unavailable: {:#}", e);
            info!("This may indicate missing system libraries or permissions issues.");
            None
        },
    };

    info!("⏳ Waiting for controllers ({} seconds)...", SCAN_DURATION.as_secs());

    let start = Instant::now();
    let mut devices: Vec<DeviceSnapshot> = Vec::new();
    while start.elapsed() < SCAN_DURATION {
        devices.clear();
        if let Some(backend) = gilrs.as_mut() {
            devices.extend(backend.poll());
        }
        if let Some(backend) = xinput.as_mut() {
            devices.extend(backend.scan());
        }
        thread::sleep(Duration::from_millis(100));
    }

    info!("");
    if devices.is_empty() {
        info!("⚠️  No controllers detected");
        info!("   Please check:");
        info!("   - Controller is connected (USB or Bluetooth paired)");
        info!("   - Drivers are installed");
        return;
    }

    info!("✅ Found {} controller(s):", devices.len());
    info!("");

    for device in &devices {
        info!("📋 {} \"{}\" ({})", device.info.id, device.info.name, device.info.backend);

        if device.buttons.is_empty() {
            info!("   🎮 (no buttons currently pressed)");
        } else {
            let pressed: Vec<_> = device.buttons.iter().map(|b| b.as_str()).collect();
            info!("   🎮 Pressed: {}", pressed.join(" "));
        }

        let moved: Vec<String> = Axis::ALL
            .iter()
            .filter_map(|axis| {
                let value = device.axis(*axis);
                (value.abs() > 0.01).then(|| format!("{}={:.3}", axis.as_str(), value))
            })
            .collect();
        if moved.is_empty() {
            info!("   🕹️  (all axes centered, move sticks to see values)");
        } else {
            info!("   🕹️  {}", moved.join(" "));
        }
        info!("");
    }

    info!("=== End Diagnostics ===");
}
