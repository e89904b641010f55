//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). A material either scatters the incoming ray
//! with an attenuation or absorbs it.

use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use crate::vec3::{near_zero, reflect, refract, Color};

/// Outcome of a scatter event that was not absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterRecord {
    /// Component-wise multiplier applied to the light gathered along `scattered`.
    pub attenuation: Color,
    /// The continuation ray leaving the surface.
    pub scattered: Ray,
}

/// Material types for ray tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f64,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f64,
    },
}

impl Material {
    /// Diffuse material with the given reflectance.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with the given color. `fuzz` is capped at 1.0.
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    /// Clear dielectric with the given refractive index.
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        r_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut R,
    ) -> Option<ScatterRecord> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, r_in, rec, rng))
            }
        }
    }
}

/// Uniform hemisphere scattering around the normal.
fn scatter_lambertian<R: Rng + ?Sized>(albedo: Color, rec: &HitRecord<'_>, rng: &mut R) -> ScatterRecord {
    let mut scatter_direction = random::random_on_hemisphere(rng, rec.normal);

    // Catch degenerate scatter direction
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    ScatterRecord {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    }
}

/// Mirror reflection of the unit incident direction, perturbed by `fuzz`.
fn scatter_metal<R: Rng + ?Sized>(
    albedo: Color,
    fuzz: f64,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> Option<ScatterRecord> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let reflected = reflected + fuzz * random::random_unit_vector(rng);
    let scattered = Ray::new(rec.p, reflected);

    // Fuzzed below the surface: absorbed
    if scattered.direction.dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(ScatterRecord {
        attenuation: albedo,
        scattered,
    })
}

fn scatter_dielectric<R: Rng + ?Sized>(
    refraction_index: f64,
    r_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut R,
) -> ScatterRecord {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f64(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    ScatterRecord {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use crate::vec3::{Point3, Vec3};

    fn hit_from_above<'a>(material: &'a Material, r: &Ray) -> HitRecord<'a> {
        // Ground plane y = 0 struck at t = 1 with normal +Y.
        HitRecord::new(r, 1.0, Vec3::Y, material)
    }

    fn incoming() -> Ray {
        Ray::new(Point3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0))
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Material::metal(Color::ONE, 3.0), Material::Metal { albedo: Color::ONE, fuzz: 1.0 });
    }

    #[test]
    fn test_lambertian_never_absorbs() {
        let mat = Material::lambertian(Color::new(0.1, 0.2, 0.3));
        let r = incoming();
        let rec = hit_from_above(&mat, &r);
        let mut rng = seeded_rng(5);
        for _ in 0..500 {
            let s = mat.scatter(&r, &rec, &mut rng).expect("lambertian scatters");
            assert_eq!(s.attenuation, Color::new(0.1, 0.2, 0.3));
            assert_eq!(s.scattered.origin, rec.p);
            assert!(s.scattered.direction.dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_perfect_mirror() {
        let mat = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);
        let r = Ray::new(Point3::new(-1.0, 1.0, 0.0), Vec3::new(2.0, -3.0, 0.5));
        let rec = hit_from_above(&mat, &r);
        let mut rng = seeded_rng(6);
        let s = mat.scatter(&r, &rec, &mut rng).expect("mirror reflects");
        assert_eq!(s.scattered.direction, reflect(r.direction.normalize(), rec.normal));
        assert_eq!(s.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_absorbs_iff_fuzzed_below_surface() {
        let mat = Material::metal(Color::ONE, 1.0);
        // Grazing incidence makes some fuzzed reflections dip under the surface.
        let r = Ray::new(Point3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = hit_from_above(&mat, &r);
        let mut absorbed = 0;
        for seed in 0..200 {
            let mut rng = seeded_rng(seed);
            let mut replay = seeded_rng(seed);
            let expected = reflect(r.direction.normalize(), rec.normal)
                + random::random_unit_vector(&mut replay);
            match mat.scatter(&r, &rec, &mut rng) {
                Some(s) => {
                    assert!(expected.dot(rec.normal) > 0.0);
                    assert!(s.scattered.direction.dot(rec.normal) > 0.0);
                }
                None => {
                    assert!(expected.dot(rec.normal) <= 0.0);
                    absorbed += 1;
                }
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_never_absorbs_or_tints() {
        let mat = Material::dielectric(1.5);
        let mut rng = seeded_rng(8);
        for i in 0..200 {
            let angle = i as f64 / 200.0 * std::f64::consts::FRAC_PI_2;
            let r = Ray::new(Point3::ZERO, Vec3::new(angle.sin(), -angle.cos(), 0.0));
            let front = hit_from_above(&mat, &r);
            let back = HitRecord::new(&r, 1.0, Vec3::NEG_Y, &mat);
            for rec in [front, back] {
                let s = mat.scatter(&r, &rec, &mut rng).expect("glass scatters");
                assert_eq!(s.attenuation, Color::ONE);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Material::dielectric(1.5);
        // Leaving glass at a steep angle: ri * sin > 1.
        let r = Ray::new(Point3::ZERO, Vec3::new(1.0, -0.2, 0.0));
        let rec = HitRecord::new(&r, 1.0, Vec3::new(0.0, 1.0, 0.0), &mat);
        let rec = HitRecord { front_face: false, ..rec };
        let mut rng = seeded_rng(9);
        for _ in 0..50 {
            let s = mat.scatter(&r, &rec, &mut rng).expect("glass scatters");
            assert_eq!(s.scattered.direction, reflect(r.direction.normalize(), rec.normal));
        }
    }

    #[test]
    fn test_dielectric_index_one_passes_through() {
        let mat = Material::dielectric(1.0);
        let r = Ray::new(Point3::ZERO, Vec3::new(0.3, -1.0, 0.2));
        let rec = hit_from_above(&mat, &r);
        let mut rng = seeded_rng(10);
        // R0 is zero, so reflection only wins when the random draw is below the Schlick term.
        let s = mat.scatter(&r, &rec, &mut rng).expect("glass scatters");
        let unit = r.direction.normalize();
        let refracted = refract(unit, rec.normal, 1.0);
        assert!((refracted - unit).length() < 1e-12);
        assert!(s.scattered.direction == refracted || s.scattered.direction == reflect(unit, rec.normal));
    }

    #[test]
    fn test_schlick_endpoints() {
        assert!((reflectance(1.0, 1.5) - 0.04).abs() < 1e-12);
        assert!((reflectance(0.0, 1.5) - 1.0).abs() < 1e-12);
        assert_eq!(reflectance(1.0, 1.0), 0.0);
    }
}
