//! Sphere primitive for ray tracing.

use crate::{Material, RenderError, RenderResult, Surface};
use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    // Always radius * radius
    radius_squared: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be finite and positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> RenderResult<Self> {
        check_radius(radius)?;

        Ok(Self {
            center,
            radius,
            radius_squared: radius * radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Change the radius, keeping the cached squared radius in sync.
    pub fn set_radius(&mut self, radius: f32) -> RenderResult<()> {
        check_radius(radius)?;
        self.radius = radius;
        self.radius_squared = radius * radius;
        Ok(())
    }
}

fn check_radius(radius: f32) -> RenderResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidRadius(radius))
    }
}

impl Surface for Sphere {
    fn is_point_inside(&self, point: Vec3) -> bool {
        point.distance_squared(self.center) < self.radius_squared
    }

    fn intersects_ray(&self, ray: &Ray) -> Option<f32> {
        // Unit direction, so the quadratic is t^2 + b*t + c = 0
        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(oc) - self.radius_squared;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / 2.0;
        let far = (-b + sqrtd) / 2.0;

        // Smallest root at or in front of the origin
        [near, far]
            .into_iter()
            .find(|&t| Interval::FORWARD.contains(t))
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Color;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::matte(Color::new(0.5, 0.5, 0.5))).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let t = sphere.intersects_ray(&ray).unwrap();
        assert!((t - 3.0).abs() < 1e-5); // Should hit at t=3
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.intersects_ray(&ray).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0);

        // Both roots are negative
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.intersects_ray(&ray).is_none());
    }

    #[test]
    fn test_ray_from_inside_hits_far_side() {
        let sphere = grey_sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = sphere.intersects_ray(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_origin_on_surface_hits_at_zero() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);

        // Tangent ray starting on the surface
        assert_eq!(sphere.intersects_ray(&ray), Some(0.0));
    }

    #[test]
    fn test_normal_at() {
        let center = Vec3::new(1.0, -2.0, 3.0);
        let sphere = grey_sphere(center, 2.0);

        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            let point = center + dir * 2.0;
            let normal = sphere.normal_at(point);

            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(normal.cross(point - center).length() < 1e-5);
            assert!(normal.dot(point - center) > 0.0);
        }
    }

    #[test]
    fn test_is_point_inside() {
        let sphere = grey_sphere(Vec3::ZERO, 1.0);

        assert!(sphere.is_point_inside(Vec3::ZERO));
        assert!(sphere.is_point_inside(Vec3::new(0.5, 0.5, 0.0)));
        assert!(!sphere.is_point_inside(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!sphere.is_point_inside(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_invalid_radius() {
        let material = Material::default();

        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, material).unwrap_err(),
            RenderError::InvalidRadius(0.0)
        );
        assert!(Sphere::new(Vec3::ZERO, -1.0, material).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::INFINITY, material).is_err());
    }

    #[test]
    fn test_set_radius_updates_cache() {
        let mut sphere = grey_sphere(Vec3::ZERO, 1.0);
        assert!(!sphere.is_point_inside(Vec3::new(1.5, 0.0, 0.0)));

        sphere.set_radius(2.0).unwrap();
        assert_eq!(sphere.radius(), 2.0);
        assert!(sphere.is_point_inside(Vec3::new(1.5, 0.0, 0.0)));

        assert!(sphere.set_radius(-3.0).is_err());
        assert_eq!(sphere.radius(), 2.0);
    }
}
