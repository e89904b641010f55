//! Demo scenes, each paired with the camera that frames it.

use std::sync::Arc;

use rand::Rng;

use crate::camera::Camera;
use crate::hittable::HittableList;
use crate::material::Material;
use crate::random;
use crate::sphere::Sphere;
use crate::vec3::{Color, Point3, Vec3};

/// Book cover scene: a field of small random spheres around three large ones.
pub fn cover<R: Rng + ?Sized>(rng: &mut R) -> (HittableList, Camera) {
    let mut world = HittableList::new();

    let ground_material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground_material)));

    // 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random::random_f64(rng),
                0.2,
                b as f64 + 0.9 * random::random_f64(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material = if choose_mat < 0.8 {
                let albedo = random::random_vec3(rng) * random::random_vec3(rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random::random_vec3_range(rng, 0.5, 1.0);
                let fuzz = random::random_f64_range(rng, 0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                Material::dielectric(1.5)
            };
            world.add(Box::new(Sphere::new(center, 0.2, Arc::new(sphere_material))));
        }
    }

    let material1 = Arc::new(Material::dielectric(1.5));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, material1)));

    let material2 = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    world.add(Box::new(Sphere::new(Point3::new(-4.0, 1.0, 0.0), 1.0, material2)));

    let material3 = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Box::new(Sphere::new(Point3::new(4.0, 1.0, 0.0), 1.0, material3)));

    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 400;
    camera.samples_per_pixel = 50;
    camera.max_depth = 50;
    camera.vfov = 20.0;
    camera.lookfrom = Point3::new(13.0, 2.0, 3.0);
    camera.lookat = Point3::ZERO;
    camera.vup = Vec3::Y;
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;

    (world, camera)
}

/// One diffuse sphere resting on a huge ground sphere, seen from the default camera.
pub fn quick() -> (HittableList, Camera) {
    let mut world = HittableList::new();

    let center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, center)));
    world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground)));

    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 400;

    (world, camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn test_cover_scene_layout() {
        let (world, mut camera) = cover(&mut seeded_rng(0));
        // Ground, up to 484 small spheres, three large ones.
        assert!(world.len() > 400 && world.len() <= 1 + 22 * 22 + 3);
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 225);
    }

    #[test]
    fn test_cover_scene_depends_only_on_seed() {
        let (a, _) = cover(&mut seeded_rng(3));
        let (b, _) = cover(&mut seeded_rng(3));
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_quick_scene() {
        let (world, camera) = quick();
        assert_eq!(world.len(), 2);
        assert_eq!(camera.lookat, Point3::new(0.0, 0.0, -1.0));
    }
}
