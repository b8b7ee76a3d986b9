//! Reproducible description of a simulated session.
//!
//! A [`Scene`] captures everything needed to replay a drift session and
//! snapshot its final frame: viewport, nominal creature size, PRNG seed,
//! simulated duration, frame interval and the rendering flags.

use crate::config::OctopusConfig;
use crate::error::RigError;
use serde::{Deserialize, Serialize};

/// Largest canvas a scene may request, in pixels (8192 x 8192).
pub const MAX_PIXELS: usize = 1 << 26;

/// Reproducible specification of a rendered session.
///
/// Two identical `Scene` values replayed by the same binary produce
/// bit-identical frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    /// Nominal creature size in pixels (`BASE_SCALE` logical units map onto it).
    pub size: f64,
    pub seed: u64,
    pub duration_ms: u64,
    pub frame_ms: u64,
    #[serde(default)]
    pub config: OctopusConfig,
}

impl Scene {
    /// Creates a scene with a 16 ms frame, zero duration and default flags.
    pub fn new(width: usize, height: usize, size: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            size,
            seed,
            duration_ms: 0,
            frame_ms: 16,
            config: OctopusConfig::default(),
        }
    }

    /// Number of frames needed to cover `duration_ms`.
    pub fn frame_count(&self) -> u64 {
        if self.frame_ms == 0 {
            return 0;
        }
        self.duration_ms.div_ceil(self.frame_ms)
    }

    /// Checks dimensions, size and frame interval.
    pub fn validate(&self) -> Result<(), RigError> {
        check_pixel_count(self.width, self.height)?;
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(RigError::InvalidSize(self.size));
        }
        if self.frame_ms == 0 {
            return Err(RigError::InvalidFrameInterval);
        }
        Ok(())
    }
}

/// Rejects zero sides and canvases above [`MAX_PIXELS`].
pub fn check_pixel_count(width: usize, height: usize) -> Result<usize, RigError> {
    if width == 0 || height == 0 {
        return Err(RigError::InvalidDimensions);
    }
    match width.checked_mul(height) {
        Some(n) if n <= MAX_PIXELS => Ok(n),
        _ => Err(RigError::InvalidDimensions),
    }
}
