//! Errors raised while configuring or running a render.

use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
///
/// Everything except [`RenderError::Cancelled`] is a configuration error and
/// is reported before any ray is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("Invalid sphere radius: {0} (must be finite and positive)")]
    InvalidRadius(f32),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("Render cancelled")]
    Cancelled,
}

/// Result type for scene setup and rendering.
pub type RenderResult<T> = Result<T, RenderError>;
