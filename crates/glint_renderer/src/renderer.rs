//! Core recursive ray tracer.
//!
//! Implements Whitted-style shading with:
//! - Ambient plus shadow-tested Lambertian lighting from point lights
//! - Fuzzy mirror reflections up to a fixed recursion depth
//! - Anti-aliasing via jittered multi-sampling
//! - Parallel bucket rendering with per-bucket seeded random streams

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, RenderError, RenderResult, Scene};
use glint_math::{Color, Ray, Vec3};
use log::{debug, info, warn};
use rand::{Rng, RngCore};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Offset applied to spawned shadow and reflection rays to avoid shadow acne.
pub const RAY_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum reflection depth; a trace evaluates at most `max_depth + 1` hits
    pub max_depth: u32,
    /// Seed for the per-bucket random streams
    pub seed: u64,
    /// Edge length of the square render buckets in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            samples_per_pixel: 4,
            max_depth: 3,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check the settings before any ray is traced.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "image size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSettings(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidSettings(
                "bucket size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Width / height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Compute the color seen by a ray.
///
/// `depth` starts at 0 for camera rays and grows by one per reflection.
/// Past `config.max_depth` the ray is terminated with the background.
pub fn trace_ray(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth > config.max_depth {
        return background(ray);
    }

    let Some(hit) = scene.closest_hit(ray) else {
        return background(ray);
    };

    let point = ray.at(hit.t);
    let normal = hit.surface.normal_at(point);
    let material = *hit.surface.material();

    let local = direct_lighting(scene, hit.index, point, normal);

    if !material.is_reflective() {
        return local;
    }

    let mut direction = reflect(ray.direction(), normal);
    if material.fuzz > 0.0 {
        direction += random_in_unit_sphere(rng) * material.fuzz;
    }
    let direction = direction.normalize_or_zero();

    let reflected_ray = Ray::offset(point, direction, RAY_EPSILON);
    let reflected = trace_ray(&reflected_ray, scene, depth + 1, config, rng);

    local * (1.0 - material.reflectivity) + reflected * material.reflectivity
}

/// Ambient plus shadow-tested diffuse light at a point on surface `index`.
pub fn direct_lighting(scene: &Scene, index: usize, point: Vec3, normal: Vec3) -> Color {
    let base = scene.surfaces()[index].material().color;
    let mut color = base * scene.ambient().radiance();

    for light in scene.lights() {
        let to_light = light.position - point;
        let distance_squared = to_light.length_squared();
        let light_dir = to_light.normalize_or_zero();

        let shadow_ray = Ray::offset(point, light_dir, RAY_EPSILON);
        if scene.is_occluded(&shadow_ray, index) {
            continue;
        }

        let lambert = normal.dot(light_dir).max(0.0);
        let attenuation = 1.0 / (distance_squared + f32::MIN_POSITIVE);

        color += base * light.radiance() * (lambert * attenuation);
    }

    color
}

/// Stylized sky returned for rays that escape the scene or run out of depth.
pub fn background(ray: &Ray) -> Color {
    let d = ray.direction();
    Color::new(d.x + 0.5, d.y + 0.5, d.z + 0.5)
        .corrected()
        .inverted()
}

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    color.corrected().to_rgba8()
}

/// Render a single pixel with multi-sampling.
///
/// Row 0 is the top of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::BLACK;

    for _ in 0..config.samples_per_pixel {
        let offset_x: f32 = rng.gen();
        let offset_y: f32 = rng.gen();

        let u = (x as f32 + offset_x) / config.width as f32;
        let v = 1.0 - (y as f32 + offset_y) / config.height as f32;

        let ray = camera.get_ray(u, v);
        pixel_color += trace_ray(&ray, scene, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Linear float image produced by a render.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Copy a rendered bucket into its region of the image.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let row_len = bucket.width as usize;

        for (local_y, row) in result.pixels.chunks_exact(row_len).enumerate() {
            let start = self.offset(bucket.x, bucket.y + local_y as u32);
            self.pixels[start..start + row_len].copy_from_slice(row);
        }
    }

    /// Convert to gamma-corrected RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgba(*color))
            .collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the scene in parallel.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    render_with_cancel(camera, scene, config, &AtomicBool::new(false))
}

/// Render the scene in parallel, stopping early once `cancel` is set.
///
/// The flag is checked at every pixel row inside each bucket. A cancelled
/// render returns [`RenderError::Cancelled`] rather than a partial image.
pub fn render_with_cancel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    info!(
        "Rendering {}x{} @ {} spp, depth {}: {} surfaces, {} lights, {} buckets on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        scene.len(),
        scene.lights().len(),
        buckets.len(),
        rayon::current_num_threads()
    );

    let total = buckets.len();
    let report_every = (total / 10).max(1);
    let completed = AtomicUsize::new(0);

    let results: Option<Vec<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, scene, config, cancel)?;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Bucket {} done ({}x{} at {},{})", bucket.index, bucket.width, bucket.height, bucket.x, bucket.y);
            if done % report_every == 0 || done == total {
                info!("Progress: {}% ({}/{} buckets)", done * 100 / total, done, total);
            }

            Some(result)
        })
        .collect();

    let Some(results) = results else {
        warn!("Render cancelled after {}/{} buckets", completed.load(Ordering::Relaxed), total);
        return Err(RenderError::Cancelled);
    };

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    Ok(image)
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * 2.0 * v.dot(n)
}

/// Random point strictly inside the unit sphere, by rejection sampling.
fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
            rng.gen::<f32>() * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
