//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket draws from its
//! own random stream, so the final image does not depend on scheduling.

use crate::renderer::render_pixel;
use crate::{Camera, RenderConfig, Scene};
use glint_math::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in row-major order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image in row-major order.
///
/// Buckets on the right and bottom edges are clipped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Random stream for one bucket, derived from the render seed.
pub fn bucket_rng(seed: u64, index: usize) -> StdRng {
    // Golden-ratio stride over bucket indices
    StdRng::seed_from_u64(seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket, or `None` if
/// `cancel` was set before a row started.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Option<BucketResult> {
    let mut rng = bucket_rng(config.seed, bucket.index);
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }

        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, scene, global_x, global_y, config, &mut rng));
        }
    }

    Some(BucketResult::new(*bucket, pixels))
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Sphere};
    use glint_math::Vec3;
    use rand::RngCore;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);

        let last = buckets[3];
        assert_eq!((last.x, last.y, last.width, last.height), (64, 64, 36, 6));
    }

    #[test]
    fn test_bucket_indices_are_row_major() {
        let buckets = generate_buckets(30, 20, 10);
        assert_eq!(buckets.len(), 6);

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
        assert_eq!((buckets[3].x, buckets[3].y), (0, 10));
    }

    #[test]
    fn test_bucket_rng_streams_differ() {
        let mut a = bucket_rng(7, 0);
        let mut b = bucket_rng(7, 1);
        let mut a_again = bucket_rng(7, 0);

        let first = a.next_u64();
        assert_ne!(first, b.next_u64());
        assert_eq!(first, a_again.next_u64());
    }

    #[test]
    fn test_render_bucket() {
        let mut scene = Scene::new(Light::ambient(Color::WHITE, 0.1));
        scene.add(Sphere::new(Vec3::ZERO, 1.0, Material::matte(Color::WHITE)).unwrap());
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y, 70.0, 1.0).unwrap();
        let config = RenderConfig {
            width: 8,
            height: 8,
            samples_per_pixel: 2,
            ..RenderConfig::default()
        };

        let bucket = Bucket::new(2, 3, 4, 2, 0);
        let result = render_bucket(&bucket, &camera, &scene, &config, &AtomicBool::new(false)).unwrap();

        assert_eq!(result.bucket, bucket);
        assert_eq!(result.pixels.len(), 8);
        assert!(render_bucket(&bucket, &camera, &scene, &config, &AtomicBool::new(true)).is_none());
    }
}
