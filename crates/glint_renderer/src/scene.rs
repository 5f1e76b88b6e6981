//! Scene container: surfaces, point lights and the ambient light.

use crate::{Light, Surface};
use glint_math::{Color, Ray};

/// The nearest intersection found along a ray.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// Position of the surface in the scene's insertion order
    pub index: usize,
    /// The surface that was hit
    pub surface: &'a dyn Surface,
    /// Ray parameter of the hit
    pub t: f32,
}

/// Everything a render reads: surfaces in insertion order, point lights,
/// and exactly one ambient light.
pub struct Scene {
    surfaces: Vec<Box<dyn Surface>>,
    lights: Vec<Light>,
    ambient: Light,
}

impl Scene {
    /// Create an empty scene lit by the given ambient light.
    pub fn new(ambient: Light) -> Self {
        Self {
            surfaces: Vec::new(),
            lights: Vec::new(),
            ambient,
        }
    }

    /// Add a surface to the scene.
    pub fn add(&mut self, surface: impl Surface + 'static) {
        self.surfaces.push(Box::new(surface));
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn surfaces(&self) -> &[Box<dyn Surface>] {
        &self.surfaces
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient(&self) -> &Light {
        &self.ambient
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Find the nearest surface along the ray by testing every surface.
    ///
    /// On equal distances the surface added first wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;

        for (index, surface) in self.surfaces.iter().enumerate() {
            if let Some(t) = surface.intersects_ray(ray) {
                if closest.map_or(true, |hit| t < hit.t) {
                    closest = Some(Hit {
                        index,
                        surface: surface.as_ref(),
                        t,
                    });
                }
            }
        }

        closest
    }

    /// Check whether any surface other than `skip` lies along the ray.
    ///
    /// The test is unbounded: surfaces past the ray's target still count.
    pub fn is_occluded(&self, ray: &Ray, skip: usize) -> bool {
        self.surfaces
            .iter()
            .enumerate()
            .any(|(index, surface)| index != skip && surface.intersects_ray(ray).is_some())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Light::ambient(Color::BLACK, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};
    use glint_math::Vec3;

    fn sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Material::matte(Color::WHITE)).unwrap()
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let mut scene = Scene::default();
        scene.add(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0));
        scene.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));
        assert_eq!(scene.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.closest_hit(&ray).unwrap();

        assert_eq!(hit.index, 1);
        assert!((hit.t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_tie_goes_to_first() {
        let mut scene = Scene::default();
        scene.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));
        scene.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));

        let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_closest_hit_empty() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert!(scene.closest_hit(&Ray::default()).is_none());
    }

    #[test]
    fn test_is_occluded_skips_surface() {
        let mut scene = Scene::default();
        scene.add(sphere(Vec3::new(0.0, 0.0, -4.0), 1.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.is_occluded(&ray, usize::MAX));
        assert!(!scene.is_occluded(&ray, 0));
    }
}
