//! Immutable per-session rendering flags for the octopus.
//!
//! The flags are read once (typically from a settings store) and handed to the
//! rig at construction; nothing in the rig mutates them afterwards.

use crate::params::{param_bool, param_u32};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default blink frequency, in blinks per 10000 frames.
pub const DEFAULT_BLINK_FREQUENCY: u32 = 10;
/// Divisor turning the integer blink frequency into a per-frame probability.
const BLINK_FREQUENCY_SCALE: f64 = 10_000.0;

/// Rendering and behavior flags for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctopusConfig {
    /// Draw raw joint markers, chords and the unstroked limb curve.
    pub debug_paths: bool,
    /// Sample limbs sparsely so they read as floating dots.
    pub particle_legs: bool,
    /// Overlay flattened pupils on the eyes.
    pub weird_eyes: bool,
    /// Blinks per 10000 frames.
    pub blink_frequency: u32,
}

impl Default for OctopusConfig {
    fn default() -> Self {
        Self {
            debug_paths: false,
            particle_legs: false,
            weird_eyes: false,
            blink_frequency: DEFAULT_BLINK_FREQUENCY,
        }
    }
}

impl OctopusConfig {
    /// Reads flags from a loose JSON object, falling back to defaults for
    /// missing or malformed entries. Never fails.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            debug_paths: param_bool(params, "debug_paths", d.debug_paths),
            particle_legs: param_bool(params, "particle_legs", d.particle_legs),
            weird_eyes: param_bool(params, "weird_eyes", d.weird_eyes),
            blink_frequency: param_u32(params, "blink_frequency", d.blink_frequency),
        }
    }

    /// Probability of starting a blink on any single frame.
    pub fn blink_probability(&self) -> f64 {
        f64::from(self.blink_frequency) / BLINK_FREQUENCY_SCALE
    }

    /// Current values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "debug_paths": self.debug_paths,
            "particle_legs": self.particle_legs,
            "weird_eyes": self.weird_eyes,
            "blink_frequency": self.blink_frequency,
        })
    }

    /// Schema describing every flag, its type and default.
    pub fn schema() -> Value {
        json!({
            "debug_paths": {
                "type": "boolean",
                "default": false,
                "description": "Overlay joint markers and chords on every limb"
            },
            "particle_legs": {
                "type": "boolean",
                "default": false,
                "description": "Draw limbs as sparse dots instead of solid tentacles"
            },
            "weird_eyes": {
                "type": "boolean",
                "default": false,
                "description": "Draw flattened pupils over the eyes"
            },
            "blink_frequency": {
                "type": "integer",
                "default": DEFAULT_BLINK_FREQUENCY,
                "min": 0,
                "max": 10000,
                "description": "Blinks per 10000 frames"
            }
        })
    }
}
