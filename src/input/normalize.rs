//! Stick and trigger normalization shared by both backends.
//!
//! Sticks use a radial (circular) deadzone rather than per-axis, so a
//! diagonal reaches full magnitude and the response is the same in every
//! direction. Values inside the deadzone become exactly zero; the rest of the
//! range is rescaled to start at zero.

/// XInput trigger threshold below which input is ignored.
///
/// Triggers report 0-255; values below this threshold are treated as zero.
pub const XINPUT_GAMEPAD_TRIGGER_THRESHOLD: u8 = 30;

/// Scale a raw XInput stick axis to [-1.0, 1.0].
///
/// Divides by 32768 so `i16::MIN` maps to exactly -1.0.
pub fn axis_from_i16(raw: i16) -> f32 {
    raw as f32 / 32768.0
}

/// One-dimensional deadzone with rescale.
///
/// `|v| <= deadzone` gives 0.0, otherwise `sign(v) * (|v| - dz) / (1 - dz)`,
/// clamped to 1.0.
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude <= deadzone || deadzone >= 1.0 {
        return 0.0;
    }
    let scaled = ((magnitude - deadzone) / (1.0 - deadzone)).min(1.0);
    scaled.copysign(value)
}

/// Radial deadzone on a stick, rescaled and clamped to the unit circle.
///
/// # Example
/// ```
/// use xdash::input::normalize::apply_radial_deadzone;
///
/// assert_eq!(apply_radial_deadzone(0.1, 0.1, 0.2), (0.0, 0.0));
/// let (x, y) = apply_radial_deadzone(1.0, 0.0, 0.2);
/// assert!((x - 1.0).abs() < 1e-6 && y == 0.0);
/// ```
pub fn apply_radial_deadzone(x: f32, y: f32, deadzone: f32) -> (f32, f32) {
    let magnitude = (x * x + y * y).sqrt();

    if magnitude <= deadzone || deadzone >= 1.0 {
        return (0.0, 0.0);
    }

    // Diagonals of a square-gated pad exceed 1.0 before the clamp
    let normalized = ((magnitude - deadzone) / (1.0 - deadzone)).min(1.0);
    let scale = normalized / magnitude;

    (x * scale, y * scale)
}

/// Normalize an XInput trigger (0-255) to [0.0, 1.0].
///
/// Applies the trigger threshold and scales the remaining range to the full
/// output range.
pub fn normalize_trigger(value: u8) -> f32 {
    if value < XINPUT_GAMEPAD_TRIGGER_THRESHOLD {
        return 0.0;
    }
    let adjusted = value - XINPUT_GAMEPAD_TRIGGER_THRESHOLD;
    let range = 255 - XINPUT_GAMEPAD_TRIGGER_THRESHOLD;
    adjusted as f32 / range as f32
}
