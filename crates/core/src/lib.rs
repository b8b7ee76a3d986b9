#![deny(unsafe_code)]
//! Core types and traits for the ocquarium octopus.
//!
//! Provides the drawing seams (`Surface`, `TaperedStroke`), quadratic `Path`
//! geometry, the `Srgb` paint color, injectable randomness (`RandomSource`,
//! `Xorshift64`), per-session `OctopusConfig`, the replayable `Scene`
//! description and settings helpers.

pub mod color;
pub mod config;
pub mod error;
pub mod params;
pub mod path;
pub mod prng;
pub mod scene;
pub mod surface;

pub use color::Srgb;
pub use config::OctopusConfig;
pub use error::RigError;
pub use path::{Path, Quad};
pub use prng::{RandomSource, Xorshift64};
pub use scene::{check_pixel_count, Scene, MAX_PIXELS};
pub use surface::{Rect, Surface, TaperedStroke};
