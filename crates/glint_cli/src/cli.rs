use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use glint_renderer::DEFAULT_BUCKET_SIZE;
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output width presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Quality {
    Low,
    Medium,
    High,
    VeryHigh,
    Ultra,
}

impl Quality {
    /// Image width in pixels.
    pub fn width(self) -> u32 {
        match self {
            Quality::Low => 640,
            Quality::Medium => 1280,
            Quality::High => 1920,
            Quality::VeryHigh => 3840,
            Quality::Ultra => 7680,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(version, about = "Render a scene of spheres with a recursive ray tracer")]
pub struct Args {
    /// Scene description (JSON). The built-in demo scene is used when omitted.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Output width preset
    #[arg(short, long, value_enum, default_value_t = Quality::High)]
    pub quality: Quality,

    /// Image width in pixels (overrides --quality)
    #[arg(long)]
    pub width: Option<u32>,

    /// Aspect ratio (width / height)
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect: f32,

    /// Vertical field of view in degrees (overrides the scene)
    #[arg(long)]
    pub fov: Option<f32>,

    /// Number of samples per pixel
    #[arg(short, long, default_value_t = 4)]
    pub samples: u32,

    /// Maximum reflection depth
    #[arg(long, default_value_t = 3)]
    pub max_depth: u32,

    /// Seed for the sampler (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render bucket size in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    pub bucket_size: u32,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Image size from the width (or quality preset) and aspect ratio.
    ///
    /// The height is truncated, never rounded.
    pub fn resolution(&self) -> Result<(u32, u32)> {
        ensure!(
            self.aspect.is_finite() && self.aspect > 0.0,
            "aspect ratio must be positive, got {}",
            self.aspect
        );

        let width = self.width.unwrap_or(self.quality.width());
        let height = (width as f32 / self.aspect) as u32;
        ensure!(
            width > 0 && height > 0,
            "image size {}x{} is empty",
            width,
            height
        );

        Ok((width, height))
    }
}
