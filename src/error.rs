//! Errors

use thiserror::Error;

/// Result type alias for rasterizer operations
pub type Result<T> = std::result::Result<T, RasterError>;

/// Errors reported by the rasterizer
///
/// All of these are reported before any span reaches the caller.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Malformed contour, point or tag structure
    #[error("invalid outline: {0}")]
    InvalidOutline(&'static str),

    /// Anti-aliasing and direct span output are both required
    #[error("invalid mode: anti-aliased direct rendering is required")]
    InvalidMode,

    /// Degenerate or contradictory argument, e.g. a clip box with min > max
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Reading or writing a coverage mask image failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
