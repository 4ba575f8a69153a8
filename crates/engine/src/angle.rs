use std::f64::consts::{PI, TAU};

/// Maps any finite angle into `[0, 2π)`.
pub fn normalize(theta: f64) -> f64 {
    let r = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Raw absolute difference between two bearings, without wrapping.
pub fn angular_delta(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// True when `delta` is within `tolerance` of zero on either side of the
/// wrap point, so 6.2 rad against 0.0 counts as pointing at it.
pub fn is_aligned(delta: f64, tolerance: f64) -> bool {
    delta <= tolerance || delta >= TAU - tolerance
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
