//! Linear RGB color.

use crate::{Interval, Vec3};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

/// Display gamma used by [`Color::corrected`].
const GAMMA: f32 = 2.2;

/// An RGB color with unbounded (HDR) float channels.
///
/// Values are not clamped until [`Color::clamp`], [`Color::clamped`] or
/// [`Color::corrected`] is called. Equality compares channels exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel to [0, 1] in place.
    pub fn clamp(&mut self) {
        *self = self.clamped();
    }

    /// Copy with every channel clamped to [0, 1].
    pub fn clamped(&self) -> Color {
        Color::new(
            Interval::UNIT.clamp(self.r),
            Interval::UNIT.clamp(self.g),
            Interval::UNIT.clamp(self.b),
        )
    }

    /// Replace every channel with `1 - channel`.
    pub fn invert(&mut self) {
        *self = self.inverted();
    }

    /// Copy with every channel replaced by `1 - channel`.
    pub fn inverted(&self) -> Color {
        Color::new(1.0 - self.r, 1.0 - self.g, 1.0 - self.b)
    }

    /// Clamp to [0, 1], then apply the inverse display gamma (1/2.2).
    pub fn corrected(&self) -> Color {
        let inv_gamma = 1.0 / GAMMA;
        let c = self.clamped();
        Color::new(c.r.powf(inv_gamma), c.g.powf(inv_gamma), c.b.powf(inv_gamma))
    }

    /// Map [0, 1] channels to bytes by multiply-and-truncate.
    ///
    /// Out-of-range input saturates, so call [`Color::corrected`] or
    /// [`Color::clamped`] first.
    pub fn to_bytes(&self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    /// Convert to 8-bit RGBA with full opacity.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.to_bytes();
        [r, g, b, 255]
    }
}

#[inline]
fn to_byte(c: f32) -> u8 {
    // `as` saturates and truncates toward zero
    (255.999 * c) as u8
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Color::new(r, g, b)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, t: f32) -> Color {
        Color::new(self.r * t, self.g * t, self.b * t)
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, t: f32) {
        *self = *self * t;
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, t: f32) -> Color {
        Color::new(self.r / t, self.g / t, self.b / t)
    }
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::BLACK, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_arithmetic() {
        let a = Color::new(0.5, 1.0, 2.0);
        let b = Color::new(2.0, 0.5, 0.25);

        assert_eq!(a + b, Color::new(2.5, 1.5, 2.25));
        assert_eq!(a * b, Color::new(1.0, 0.5, 0.5));
        assert_eq!(a * 2.0, Color::new(1.0, 2.0, 4.0));
        assert_eq!(a / 2.0, Color::new(0.25, 0.5, 1.0));

        let mut c = a;
        c += b;
        c *= 2.0;
        assert_eq!(c, Color::new(5.0, 3.0, 4.5));
    }

    #[test]
    fn test_color_sum() {
        let total: Color = vec![Color::WHITE; 4].into_iter().sum();
        assert_eq!(total, Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_clamp() {
        let mut c = Color::new(-0.5, 0.5, 7.0);
        assert_eq!(c.clamped(), Color::new(0.0, 0.5, 1.0));
        c.clamp();
        assert_eq!(c, Color::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_invert() {
        let mut c = Color::new(0.0, 0.25, 1.0);
        assert_eq!(c.inverted(), Color::new(1.0, 0.75, 0.0));
        c.invert();
        assert_eq!(c, Color::new(1.0, 0.75, 0.0));
    }

    #[test]
    fn test_corrected_clamps_first() {
        let c = Color::new(-1.0, 4.0, 0.5).corrected();
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 0.5f32.powf(1.0 / 2.2)).abs() < 1e-6);
    }

    #[test]
    fn test_corrected_then_bytes_endpoints() {
        assert_eq!(Color::BLACK.corrected().to_bytes(), [0, 0, 0]);
        assert_eq!(Color::WHITE.corrected().to_bytes(), [255, 255, 255]);
    }

    #[test]
    fn test_bytes_truncate() {
        // 0.5 * 255.999 = 127.9995, truncated rather than rounded
        assert_eq!(Color::new(0.5, 0.5, 0.5).to_bytes(), [127, 127, 127]);
        assert_eq!(Color::new(0.2, 0.4, 0.6).to_rgba8(), [51, 102, 153, 255]);
    }
}
