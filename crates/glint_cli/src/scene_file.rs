//! JSON scene descriptions.
//!
//! A scene file holds the camera placement, one ambient light, point lights
//! and a list of surfaces tagged by kind:
//!
//! ```json
//! {
//!   "camera": { "from": [0, 0, 5], "at": [0, 0, 0], "vfov": 70 },
//!   "ambient": { "color": [1, 1, 1], "intensity": 0.1 },
//!   "lights": [{ "position": [0, 5, 0], "color": [0, 1, 1], "intensity": 15 }],
//!   "surfaces": [
//!     { "type": "sphere", "center": [0, 0, -1], "radius": 2,
//!       "color": [0, 1, 0], "reflectivity": 0.5, "fuzz": 0.1 }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::{Camera, Color, Light, Material, RenderResult, Scene, Sphere, Vec3};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub camera: CameraDesc,
    pub ambient: AmbientDesc,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub surfaces: Vec<SurfaceDesc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    pub from: [f32; 3],
    pub at: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmbientDesc {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDesc {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
        color: [f32; 3],
        #[serde(default)]
        reflectivity: f32,
        #[serde(default)]
        fuzz: f32,
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_vfov() -> f32 {
    70.0
}

impl SceneFile {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))
    }

    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// The demo scene: a reflective green sphere, a blue sphere and a white
    /// ground, lit by a cyan and a magenta light.
    pub fn built_in() -> Self {
        Self {
            camera: CameraDesc {
                from: [0.0, 0.0, 5.0],
                at: [0.0, 0.0, 0.0],
                up: default_up(),
                vfov: default_vfov(),
            },
            ambient: AmbientDesc {
                color: [1.0, 1.0, 1.0],
                intensity: 0.1,
            },
            lights: vec![
                LightDesc {
                    position: [0.0, 5.0, 0.0],
                    color: [0.0, 1.0, 1.0],
                    intensity: 15.0,
                },
                LightDesc {
                    position: [-2.0, 2.0, 1.0],
                    color: [1.0, 0.0, 1.0],
                    intensity: 10.0,
                },
            ],
            surfaces: vec![
                SurfaceDesc::Sphere {
                    center: [0.0, 0.0, -1.0],
                    radius: 2.0,
                    color: [0.0, 1.0, 0.0],
                    reflectivity: 0.5,
                    fuzz: 0.1,
                },
                SurfaceDesc::Sphere {
                    center: [3.0, 0.0, 0.0],
                    radius: 1.0,
                    color: [0.0, 0.0, 1.0],
                    reflectivity: 0.3,
                    fuzz: 0.0,
                },
                SurfaceDesc::Sphere {
                    center: [0.0, -102.0, 0.0],
                    radius: 100.0,
                    color: [1.0, 1.0, 1.0],
                    reflectivity: 0.0,
                    fuzz: 0.0,
                },
            ],
        }
    }

    /// Build the renderer's scene, validating every surface.
    pub fn build_scene(&self) -> RenderResult<Scene> {
        let ambient = Light::ambient(Color::from(self.ambient.color), self.ambient.intensity);
        let mut scene = Scene::new(ambient);

        for light in &self.lights {
            scene.add_light(Light::new(
                Vec3::from_array(light.position),
                Color::from(light.color),
                light.intensity,
            ));
        }

        for surface in &self.surfaces {
            match *surface {
                SurfaceDesc::Sphere {
                    center,
                    radius,
                    color,
                    reflectivity,
                    fuzz,
                } => {
                    let material = Material::new(Color::from(color), reflectivity, fuzz)?;
                    scene.add(Sphere::new(Vec3::from_array(center), radius, material)?);
                }
            }
        }

        Ok(scene)
    }

    /// Build the camera for the given aspect ratio, optionally replacing the
    /// scene's field of view.
    pub fn build_camera(&self, aspect: f32, vfov: Option<f32>) -> RenderResult<Camera> {
        Camera::new(
            Vec3::from_array(self.camera.from),
            Vec3::from_array(self.camera.at),
            Vec3::from_array(self.camera.up),
            vfov.unwrap_or(self.camera.vfov),
            aspect,
        )
    }
}
