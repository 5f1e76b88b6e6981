//! Camera for ray generation.

use crate::{RenderError, RenderResult};
use glint_math::{Interval, Ray, Vec3};

/// Pinhole camera mapping normalized image coordinates to world rays.
///
/// All derived vectors are computed once in [`Camera::new`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// - `vup`: world up vector, must not be parallel to the view direction
    /// - `vfov`: vertical field of view in degrees, in (0, 180)
    /// - `aspect`: viewport width / height
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
    ) -> RenderResult<Self> {
        if !(look_from.is_finite() && look_at.is_finite() && vup.is_finite()) {
            return Err(degenerate("camera vectors must be finite"));
        }
        if !Interval::new(0.0, 180.0).surrounds(vfov) {
            return Err(degenerate(format!("vertical fov {vfov} is outside (0, 180)")));
        }
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(degenerate(format!("aspect ratio {aspect} must be positive")));
        }

        // Calculate camera basis vectors
        let w = (look_from - look_at)
            .try_normalize()
            .ok_or_else(|| degenerate("look_from and look_at are the same point"))?;
        let u = vup
            .cross(w)
            .try_normalize()
            .ok_or_else(|| degenerate("up vector is parallel to the view direction"))?;
        let v = w.cross(u);

        // Calculate viewport dimensions
        let h = (vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect * viewport_height;

        let origin = look_from;
        let horizontal = u * viewport_width;
        let vertical = v * viewport_height;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        })
    }

    /// Generate a ray through normalized image coordinates.
    ///
    /// (0, 0) is the lower-left corner of the viewport, (1, 1) the upper-right.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let target = self.lower_left_corner + self.horizontal * u + self.vertical * v;
        Ray::new(self.origin, (target - self.origin).normalize_or_zero())
    }

    /// Eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

fn degenerate(reason: impl Into<String>) -> RenderError {
    RenderError::DegenerateCamera(reason.into())
}
