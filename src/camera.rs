//! Camera for ray generation and scene rendering

use std::time::Instant;

use log::{debug, info, trace};
use rand::Rng;

use crate::color::to_rgb8;
use crate::error::RenderError;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::output::PixelSink;
use crate::progress::RenderObserver;
use crate::random;
use crate::ray::Ray;
use crate::vec3::{Color, Point3, Vec3};

/// Scattered rays start their search this far from the surface they left.
const SELF_INTERSECTION_EPSILON: f64 = 0.001;

/// Squared sine of the smallest angle allowed between `vup` and the view direction.
const PARALLEL_EPSILON: f64 = 1e-16;

/// Camera for ray generation and scene rendering.
///
/// Thin-lens camera with anti-aliasing via multi-sampling. Set the public
/// fields, then call [`Camera::render`] (or [`Camera::initialize`] to use
/// [`Camera::get_ray`] and [`Camera::ray_color`] directly).
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point camera is looking from (camera position)
    pub lookfrom: Point3,
    /// Point camera is looking at (look target)
    pub lookat: Point3,
    /// Camera-relative "up" direction vector
    pub vup: Vec3,
    /// Variation angle of rays through each pixel (defocus blur control), in degrees
    pub defocus_angle: f64,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f64,

    image_height: u32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    pixel_samples_scale: f64,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: square 100px image, 10 samples per pixel, 10 bounces, 90° FOV
    /// looking down -Z from the origin, no defocus blur.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            image_height: 1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            pixel_samples_scale: 1.0,
            u: Vec3::ZERO,
            v: Vec3::ZERO,
            w: Vec3::ZERO,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Image height derived from width and aspect ratio. Valid after [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Renders the scene into `sink`.
    ///
    /// Pixels are produced row-major from the top scanline. The first sink
    /// error aborts the render and is returned.
    pub fn render<R: Rng + ?Sized>(
        &mut self,
        world: &dyn Hittable,
        sink: &mut dyn PixelSink,
        observer: &dyn RenderObserver,
        rng: &mut R,
    ) -> Result<(), RenderError> {
        self.initialize()?;

        info!(
            "Rendering {}x{} at {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let generation_start = Instant::now();

        sink.begin(self.image_width, self.image_height)?;

        for j in 0..self.image_height {
            let remaining = self.image_height - j;
            trace!("Scanlines remaining: {}", remaining);
            observer.scanline(remaining);

            for i in 0..self.image_width {
                let mut pixel_color = Color::ZERO;
                for _sample in 0..self.samples_per_pixel {
                    let r = self.get_ray(i, j, rng);
                    pixel_color += self.ray_color(&r, self.max_depth, world, rng);
                }
                sink.write_pixel(to_rgb8(self.pixel_samples_scale * pixel_color))?;
            }
        }

        sink.finish()?;
        observer.done();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        Ok(())
    }

    /// Validate the configuration and derive the viewport and lens geometry.
    ///
    /// Called by [`Camera::render`]; calling it again after changing a public
    /// field recomputes everything.
    pub fn initialize(&mut self) -> Result<(), RenderError> {
        self.validate()?;

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        debug!(
            "Camera basis u={:?} v={:?} w={:?}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            self.u, self.v, self.w, viewport_width, viewport_height, defocus_radius
        );

        Ok(())
    }

    fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: String| Err(RenderError::InvalidConfig(msg));

        if self.image_width == 0 {
            return invalid("image width must be at least 1".to_string());
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples per pixel must be at least 1".to_string());
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid(format!("aspect ratio must be positive, got {}", self.aspect_ratio));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return invalid(format!("focus distance must be positive, got {}", self.focus_dist));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid(format!("vertical field of view must lie in (0, 180), got {}", self.vfov));
        }
        if !(self.defocus_angle.is_finite() && self.defocus_angle >= 0.0) {
            return invalid(format!("defocus angle must be non-negative, got {}", self.defocus_angle));
        }
        let view = self.lookfrom - self.lookat;
        let view_len_sq = view.length_squared();
        if !(view_len_sq.is_finite() && view_len_sq > 0.0) {
            return invalid("lookfrom and lookat must be distinct points".to_string());
        }
        // Relative to both lengths so the check does not depend on scene scale
        let parallel_limit = PARALLEL_EPSILON * self.vup.length_squared() * view_len_sq;
        if self.vup.cross(view).length_squared() <= parallel_limit {
            return invalid("up vector must not be parallel to the view direction".to_string());
        }

        Ok(())
    }

    /// Generate a ray through pixel (i, j) with random sampling.
    ///
    /// Jitters within the pixel footprint for anti-aliasing and, when
    /// `defocus_angle > 0`, starts the ray on the defocus disk for depth of field.
    pub fn get_ray<R: Rng + ?Sized>(&self, i: u32, j: u32, rng: &mut R) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f64 + offset.x) * self.pixel_delta_u)
            + ((j as f64 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Recursively follows bounces until the ray is absorbed, escapes to the
    /// sky, or `depth` runs out.
    pub fn ray_color<R: Rng + ?Sized>(&self, r: &Ray, depth: u32, world: &dyn Hittable, rng: &mut R) -> Color {
        // If we've exceeded the ray bounce limit, no more light is gathered
        if depth == 0 {
            return Color::ZERO;
        }

        if let Some(rec) = world.hit(r, Interval::new(SELF_INTERSECTION_EPSILON, f64::INFINITY)) {
            return match rec.material.scatter(r, &rec, rng) {
                Some(scatter) => scatter.attenuation * self.ray_color(&scatter.scattered, depth - 1, world, rng),
                None => Color::ZERO,
            };
        }

        background(r)
    }
}

/// Sky gradient seen by rays that escape the scene.
///
/// Blends white at the horizon-down end into light blue as the ray points up.
pub fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0)
}

/// Generate random offset within [-0.5, 0.5] square for pixel sampling.
fn sample_square<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let x = random::random_f64(rng) - 0.5;
    let y = random::random_f64(rng) - 0.5;
    Vec3::new(x, y, 0.0)
}
