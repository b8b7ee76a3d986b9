//! PNG output of a rendered [`Pixmap`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! raster surface do not pull in the `image` crate.

use ocquarium_core::RigError;
use std::path::Path;

use crate::pixmap::Pixmap;

/// Writes a pixmap as an RGBA PNG.
///
/// Returns `RigError::InvalidDimensions` if the pixmap dimensions overflow
/// `u32`, or `RigError::Io` on encode or write failure.
pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), RigError> {
    let w = u32::try_from(pixmap.width()).map_err(|_| RigError::InvalidDimensions)?;
    let h = u32::try_from(pixmap.height()).map_err(|_| RigError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, pixmap.to_rgba())
        .ok_or_else(|| RigError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| RigError::Io(e.to_string()))?;
    log::debug!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}
