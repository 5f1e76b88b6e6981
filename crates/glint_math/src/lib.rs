// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod color;
mod interval;
mod ray;
pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;
