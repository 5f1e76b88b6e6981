//! Surface appearance shared by every primitive.

use crate::{RenderError, RenderResult};
use glint_math::{Color, Interval};

/// Reflectivity at or below this is treated as a matte surface and never
/// spawns a reflection ray.
pub const REFLECTIVITY_EPSILON: f32 = 1e-4;

/// Ambient + Lambertian + mirror appearance of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color (unclamped)
    pub color: Color,
    /// Weight of the reflected color in [0, 1]
    pub reflectivity: f32,
    /// Radius of the random perturbation applied to reflected rays
    pub fuzz: f32,
}

impl Material {
    /// Create a new material.
    ///
    /// - `reflectivity`: 0.0 = matte, 1.0 = perfect mirror
    /// - `fuzz`: 0.0 = sharp reflections, larger values blur them
    pub fn new(color: Color, reflectivity: f32, fuzz: f32) -> RenderResult<Self> {
        if !Interval::UNIT.contains(reflectivity) {
            return Err(RenderError::InvalidMaterial(format!(
                "reflectivity {reflectivity} is outside [0, 1]"
            )));
        }
        if !(fuzz.is_finite() && fuzz >= 0.0) {
            return Err(RenderError::InvalidMaterial(format!(
                "fuzz {fuzz} must be finite and non-negative"
            )));
        }

        Ok(Self {
            color,
            reflectivity,
            fuzz,
        })
    }

    /// A non-reflective material.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            reflectivity: 0.0,
            fuzz: 0.0,
        }
    }

    /// Whether hits on this material spawn a reflection ray.
    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > REFLECTIVITY_EPSILON
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::matte(Color::new(0.5, 0.5, 0.5))
    }
}
