//! Approximate comparison functions that automatically use [`EPSILON`].

use std::f64::consts::TAU;

use crate::{EPSILON, Float};

/// Returns whether `x` has an absolute value no greater than `EPSILON`.
pub fn is_approx_zero(x: Float) -> bool {
    x.abs() <= EPSILON
}

/// Wraps an angle in radians into the range `0.0..TAU`.
pub fn wrap_angle(angle: Float) -> Float {
    let ret = angle.rem_euclid(TAU);
    // `rem_euclid()` can round up to exactly `TAU`
    if ret >= TAU { 0.0 } else { ret }
}

/// Returns the shortest distance between two angles in radians, accounting for
/// wraparound. The result is in the range `0.0..=PI`.
pub fn angle_distance(a: Float, b: Float) -> Float {
    let d = wrap_angle(a - b);
    d.min(TAU - d)
}
