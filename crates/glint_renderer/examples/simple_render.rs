//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it and saves to PPM format.

use glint_renderer::{
    color_to_rgba, render, Camera, Color, ImageBuffer, Light, Material, RenderConfig,
    RenderResult, Scene, Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint - Simple Example");
    println!("======================");

    let world = build_scene()?;
    println!("Created {} surfaces", world.len());

    let config = RenderConfig {
        width: 400,
        height: 225,
        samples_per_pixel: 8,
        max_depth: 4,
        seed: 42,
        ..RenderConfig::default()
    };

    let camera = Camera::new(
        Vec3::new(0.0, 1.0, 6.0), // look_from
        Vec3::new(0.0, 0.0, 0.0), // look_at
        Vec3::new(0.0, 1.0, 0.0), // vup
        50.0,
        config.aspect_ratio(),
    )?;

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &world, &config)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> RenderResult<Scene> {
    let mut world = Scene::new(Light::ambient(Color::WHITE, 0.1));

    world.add_light(Light::new(Vec3::new(4.0, 6.0, 4.0), Color::WHITE, 40.0));
    world.add_light(Light::new(Vec3::new(-3.0, 2.0, 2.0), Color::new(1.0, 0.6, 0.2), 8.0));

    // Ground
    world.add(Sphere::new(
        Vec3::new(0.0, -1001.0, 0.0),
        1000.0,
        Material::matte(Color::new(0.8, 0.8, 0.8)),
    )?);

    // Mirror, glossy and matte spheres
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, 0.0),
        1.0,
        Material::new(Color::new(0.9, 0.9, 0.9), 0.8, 0.0)?,
    )?);
    world.add(Sphere::new(
        Vec3::new(-2.2, 0.0, -0.5),
        1.0,
        Material::new(Color::new(0.2, 0.4, 1.0), 0.4, 0.2)?,
    )?);
    world.add(Sphere::new(
        Vec3::new(2.2, 0.0, -0.5),
        1.0,
        Material::matte(Color::new(1.0, 0.3, 0.2)),
    )?);

    Ok(world)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
