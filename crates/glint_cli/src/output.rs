//! PNG export of rendered images.

use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::ImageBuffer;
use image::{ColorType, ImageFormat};
use log::warn;

/// Save a rendered image as an 8-bit RGBA PNG.
///
/// Colors are gamma corrected and truncated to bytes; alpha is always 255.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        warn!("{} does not end in .png, writing PNG data anyway", path.display());
    }

    image::save_buffer_with_format(
        path,
        &image.to_rgba(),
        image.width,
        image.height,
        ColorType::Rgba8,
        ImageFormat::Png,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::Color;

    #[test]
    fn test_save_png_round_trip() {
        let mut image = ImageBuffer::new(3, 2);
        image.pixels[0] = Color::WHITE;
        image.pixels[5] = Color::new(2.0, -1.0, 0.0);

        let path = std::env::temp_dir().join(format!("glint_output_test_{}.png", std::process::id()));
        save_png(&image, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(loaded.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(loaded.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png_bad_directory() {
        let image = ImageBuffer::new(1, 1);
        assert!(save_png(&image, Path::new("/nonexistent/dir/out.png")).is_err());
    }
}
