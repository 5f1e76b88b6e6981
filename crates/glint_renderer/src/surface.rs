//! Surface trait for ray-object queries.

use crate::Material;
use glint_math::{Ray, Vec3};

/// Trait for objects that can be placed in a scene and hit by rays.
pub trait Surface: Send + Sync {
    /// Test whether a point lies strictly inside the surface's volume.
    fn is_point_inside(&self, point: Vec3) -> bool;

    /// Find the nearest non-negative ray parameter where the ray meets
    /// the surface, or `None` if it never does.
    fn intersects_ray(&self, ray: &Ray) -> Option<f32>;

    /// Outward unit normal at a point on the surface.
    ///
    /// Only meaningful for points that lie on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Appearance of the surface.
    fn material(&self) -> &Material;
}
