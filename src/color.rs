//! Linear radiance to display bytes.

use crate::interval::Interval;
use crate::vec3::Color;

/// Channels are clamped here before scaling so 1.0 lands on 255, not 256.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Gamma 2 transfer. Non-positive (or NaN) input maps to 0.
pub fn linear_to_gamma(linear_component: f64) -> f64 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct, clamp and quantize a linear color to an RGB byte triple.
pub fn to_rgb8(pixel_color: Color) -> [u8; 3] {
    let byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [byte(pixel_color.x), byte(pixel_color.y), byte(pixel_color.z)]
}
