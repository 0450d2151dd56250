//! Heading smoothing.

use warband_core::types::wrap_angle;

/// Rotate `current` toward `desired`, closing `rate * dt` of the angular
/// error per frame (exponential approach, never overshooting).
pub fn turn_towards(current: f32, desired: f32, rate: f32, dt: f32) -> f32 {
    let error = wrap_angle(desired - current);
    let step = (rate * dt).clamp(0.0, 1.0);
    wrap_angle(current + error * step)
}
