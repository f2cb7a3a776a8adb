//! Linear ramp arithmetic.
//!
//! Acceleration is a per-step speed delta in fixed point, scaled by
//! [`ACCELERATION_SCALE`] so short ramps keep sub-step/s precision. All
//! intermediate products are computed in `i64`: `acceleration × steps` can
//! exceed `i32` long before either operand does.

/// Fixed-point scale of the acceleration value (two decimal places).
pub const ACCELERATION_SCALE: i64 = 100;

/// Per-step speed change, scaled by [`ACCELERATION_SCALE`] and rounded half
/// away from zero.
///
/// A non-zero speed difference never rounds to zero: that would freeze the
/// speed for the whole ramp. `steps` must be at least 1; zero yields 0.
pub fn ramp_acceleration(current: u16, target: u16, steps: u32) -> i32 {
    if steps == 0 {
        return 0;
    }

    let delta = target as i64 - current as i64;
    if delta == 0 {
        return 0;
    }

    let scaled = div_round(delta * ACCELERATION_SCALE, steps as i64);
    let scaled = if scaled == 0 { delta.signum() } else { scaled };

    // |delta| ≤ u16::MAX, so |scaled| ≤ 6_553_500
    scaled as i32
}

/// Speed the ramp prescribes when `remaining` steps are left.
///
/// Unbounded: callers saturate into their speed range.
#[inline]
pub fn ramp_speed(target: u16, acceleration: i32, remaining: u32) -> i64 {
    target as i64 - (acceleration as i64 * remaining as i64) / ACCELERATION_SCALE
}

/// Next speed on a ramp from `current`, never moving away from `target`.
///
/// Rounding of the fixed-point acceleration can place the first few points of
/// a long, shallow ramp behind the starting speed; holding the current speed
/// instead keeps the ramp monotone.
pub fn next_ramp_speed(current: u16, target: u16, acceleration: i32, remaining: u32) -> u16 {
    let speed = ramp_speed(target, acceleration, remaining);
    let speed = if acceleration > 0 {
        speed.max(current as i64)
    } else {
        speed.min(current as i64)
    };
    speed.clamp(0, u16::MAX as i64) as u16
}

fn div_round(numerator: i64, denominator: i64) -> i64 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}
