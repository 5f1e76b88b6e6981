use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, RenderConfig};
use log::info;

mod cli;
mod output;
mod scene_file;

use cli::Args;
use scene_file::SceneFile;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG, when set, takes precedence over --log-level
    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    info!("Starting Glint {}", env!("CARGO_PKG_VERSION"));

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }

    let (width, height) = args.resolution()?;

    let scene_file = match &args.scene {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            SceneFile::load(path)?
        }
        None => SceneFile::built_in(),
    };

    // Reject bad scenes before tracing anything
    let scene = scene_file.build_scene()?;
    let camera = scene_file.build_camera(args.aspect, args.fov)?;

    let config = RenderConfig {
        width,
        height,
        samples_per_pixel: args.samples,
        max_depth: args.max_depth,
        seed: args.seed.unwrap_or_else(rand::random),
        bucket_size: args.bucket_size,
    };

    info!("Settings:");
    info!("  FOV: {}", args.fov.unwrap_or(scene_file.camera.vfov));
    info!("  Width: {}", config.width);
    info!("  Height: {}", config.height);
    info!("  Anti-aliasing: {}", config.samples_per_pixel);
    info!("  Depth: {}", config.max_depth);
    info!("  Seed: {}", config.seed);

    let start = Instant::now();
    let image = render(&camera, &scene, &config)?;
    info!("Completed render in {:.2} s", start.elapsed().as_secs_f32());

    let start = Instant::now();
    output::save_png(&image, &args.output)?;
    info!(
        "Wrote {} in {} ms",
        args.output.display(),
        start.elapsed().as_millis()
    );

    Ok(())
}
