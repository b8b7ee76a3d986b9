#![deny(unsafe_code)]
//! Software rendering for the ocquarium rig.
//!
//! [`Pixmap`] is an anti-aliased CPU [`Surface`](ocquarium_core::Surface)
//! built on `tiny-skia`, [`RibbonStroke`] draws tapered limbs as a joined
//! ribbon or a trail of dots, and [`snapshot::write_png`] (behind the `png`
//! feature) saves a frame to disk.

pub mod geometry;
pub mod pixmap;
#[cfg(feature = "png")]
pub mod snapshot;
pub mod stroke;

pub use pixmap::Pixmap;
pub use stroke::RibbonStroke;
