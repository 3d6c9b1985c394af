//! Small numeric helpers shared by components and rendering.

/// Snap `x` to a multiple of `step`, truncating toward zero.
///
/// Used to keep sprite and textbox positions on a coarse pixel grid so the
/// shake jitter and walk movement read as chunky pixel-art motion.
pub fn quantize(x: f32, step: f32) -> f32 {
    (x / step).trunc() * step
}

/// Linearly interpolate between two floats.
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
