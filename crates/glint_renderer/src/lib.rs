//! Glint renderer - recursive CPU ray tracing
//!
//! A Whitted-style ray tracer: ambient plus shadowed Lambertian lighting
//! from point lights, fuzzy mirror reflections with a hard depth cap, and
//! jittered supersampling. The scene is searched exhaustively; there is no
//! acceleration structure.

mod bucket;
mod camera;
mod error;
mod light;
mod material;
mod renderer;
mod scene;
mod sphere;
mod surface;

pub use bucket::{
    bucket_rng, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use light::Light;
pub use material::{Material, REFLECTIVITY_EPSILON};
pub use renderer::{
    background, color_to_rgba, direct_lighting, render, render_pixel, render_with_cancel, trace_ray,
    ImageBuffer, RenderConfig, RAY_EPSILON,
};
pub use scene::{Hit, Scene};
pub use sphere::Sphere;
pub use surface::Surface;

/// Re-export the math primitives from glint_math
pub use glint_math::{Color, Interval, Ray, Vec3};
