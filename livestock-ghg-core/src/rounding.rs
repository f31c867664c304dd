//! Rounding and clamping helpers.
//!
//! Published figures are rounded with half-up semantics: ties go towards positive
//! infinity, so `0.125` rounds to `0.13` and `-0.125` rounds to `-0.12`. For the
//! non-negative values the pipeline normally produces this is the same as rounding
//! half away from zero. Banker's rounding would diverge on `.xx5` boundaries.

/// Round half up to the nearest integer.
///
/// Unlike [`f64::round`], negative ties round towards zero. `NaN` and infinities are
/// returned unchanged.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round `value` to `decimals` places by scaling, rounding half up and scaling back.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Round to 2 decimal places (ton and CO2e-ton figures).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to 3 decimal places (Gg figures).
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// Clamp a fraction to `[0, 1]`. `NaN` passes through unchanged.
pub fn clamp01(value: f64) -> f64 {
    num::clamp(value, 0.0, 1.0)
}
