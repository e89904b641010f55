//! Vector types and the geometric helpers built on them.
//!
//! All arithmetic (component-wise products, scalar ops, dot, cross, length,
//! normalization) comes from [`glam::DVec3`]. This module only adds the few
//! operations the tracer needs that glam does not name the same way.

/// Point or direction in 3D space, double precision.
pub type Vec3 = glam::DVec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, one channel per component.
pub type Color = Vec3;

/// Magnitude below which a component counts as zero.
const NEAR_ZERO: f64 = 1e-8;

/// True when every component of `v` is smaller than `1e-8` in magnitude.
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Reflect `v` about the unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n` (Snell's law).
///
/// `etai_over_etat` is the ratio of the incident medium's index over the
/// transmitted medium's index.
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
