//! Spheretracer path tracer
//!
//! Renders scenes of spheres by tracing rays backwards from a thin-lens
//! camera, scattering them off Lambertian, metal and glass surfaces until they
//! escape to the sky or run out of bounces. Output goes to any [`output::PixelSink`].

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod progress;
pub mod random;
pub mod ray;
pub mod scene;
pub mod sphere;
pub mod vec3;
