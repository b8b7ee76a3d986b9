//! Error types for the ocquarium core.

use thiserror::Error;

/// Errors produced by rig and surface operations.
#[derive(Debug, Error)]
pub enum RigError {
    /// The nominal pixel size was zero, negative or not finite.
    #[error("invalid size {0}: the nominal pixel size must be positive")]
    InvalidSize(f64),

    /// Width or height was zero, or the canvas exceeds the pixel ceiling.
    #[error("invalid dimensions: width and height must be non-zero and at most 67108864 pixels in total")]
    InvalidDimensions,

    /// The frame interval of a scene was zero.
    #[error("invalid frame interval: frames must advance by at least 1 ms")]
    InvalidFrameInterval,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing a snapshot failed.
    #[error("i/o error: {0}")]
    Io(String),
}
