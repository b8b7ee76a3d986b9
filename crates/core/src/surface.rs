//! Drawing seams between the rig and whatever actually paints pixels.
//!
//! The rig only ever talks to a [`Surface`] (flat fills, outlines and
//! clip-outs in logical coordinates under a host-supplied transform) and to a
//! [`TaperedStroke`] for the variable-width limbs. Both traits are
//! object-safe so hosts can pass `&mut dyn Surface`.

use crate::color::Srgb;
use crate::path::Path;
use glam::{DAffine2, DVec2};

/// Axis-aligned rectangle given by its left, top, right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            min: DVec2::new(left.min(right), top.min(bottom)),
            max: DVec2::new(left.max(right), top.max(bottom)),
        }
    }

    /// Rectangle centred on `center` extending `half` in each direction.
    pub fn from_center_half(center: DVec2, half: DVec2) -> Self {
        Self::from_ltrb(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// Half-open containment: left/top edges inside, right/bottom outside.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// A 2D drawing target.
///
/// All coordinates are in the space selected by the last
/// [`set_transform`](Surface::set_transform) call; implementations map them
/// to device pixels.
pub trait Surface {
    /// Replaces the current logical-to-device transform.
    fn set_transform(&mut self, transform: DAffine2);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb);

    /// Outlines a circle with a stroke of `width`.
    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, color: Srgb);

    /// Fills the ellipse inscribed in `bounds`.
    fn fill_oval(&mut self, bounds: Rect, color: Srgb);

    fn fill_round_rect(&mut self, bounds: Rect, corner: f64, color: Srgb);

    /// Excludes `rect` from subsequent fills until the matching
    /// [`pop_clip`](Surface::pop_clip).
    fn push_clip_out(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Strokes a path with a constant width and round caps.
    fn stroke_path(&mut self, path: &Path, width: f64, color: Srgb);

    /// Strokes independent line segments; `dash` gives equal on/off lengths.
    fn stroke_segments(
        &mut self,
        segments: &[(DVec2, DVec2)],
        width: f64,
        color: Srgb,
        dash: Option<f64>,
    );
}

/// Renders a ribbon whose width varies linearly along a path.
///
/// The path is sampled no closer than the minimum step. Solid strokes join
/// consecutive samples into one continuous tentacle; dotted strokes leave
/// each sample as a separate dot.
pub trait TaperedStroke {
    /// Sets the minimum distance between samples, in logical units.
    fn set_min_step(&mut self, step: f64);

    fn min_step(&self) -> f64;

    /// Switches between a joined ribbon (`false`) and a trail of dots.
    fn set_dotted(&mut self, dotted: bool);

    fn is_dotted(&self) -> bool;

    /// Draws `path` from `start_width` at its start to `end_width` at its end.
    fn stroke(
        &self,
        surface: &mut dyn Surface,
        path: &Path,
        start_width: f64,
        end_width: f64,
        color: Srgb,
    );
}
