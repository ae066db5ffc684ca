//! Error types for scene construction and rendering.

use thiserror::Error;

/// Invalid geometry handed to a constructor.
///
/// These are precondition violations: the renderer refuses to build a
/// shape or camera that would later produce NaN pixels.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Cannot normalize a zero-length vector")]
    ZeroLengthVector,

    #[error("Sphere radius must be finite and positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Light intensity must be finite and positive, got {0}")]
    NonPositiveIntensity(f64),

    #[error("Field of view must be within (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("Image must have a non-zero size, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Invalid render parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Errors surfaced by a render call.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render config: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },

    #[error("Camera is {camera_width}x{camera_height} but config asks for {width}x{height}")]
    SizeMismatch {
        camera_width: u32,
        camera_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Render was cancelled")]
    Cancelled,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
