//! Point and ambient lights.

use glint_math::{Color, Vec3};

/// A light source.
///
/// Point lights use all three fields. The ambient light reuses the same
/// type and ignores `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Create a point light.
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Create an ambient light. Its position is never read.
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::new(Vec3::ZERO, color, intensity)
    }

    /// Color scaled by intensity.
    #[inline]
    pub fn radiance(&self) -> Color {
        self.color * self.intensity
    }
}
