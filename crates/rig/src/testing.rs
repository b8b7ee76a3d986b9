//! Recording doubles for the drawing seams.

use std::cell::RefCell;

use glam::{DAffine2, DVec2};
use ocquarium_core::{Path, Rect, Srgb, Surface, TaperedStroke};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Transform(DAffine2),
    FillCircle(DVec2, f64, Srgb),
    StrokeCircle(DVec2, f64, Srgb),
    FillOval(Rect, Srgb),
    FillRoundRect(Rect, f64, Srgb),
    PushClipOut(Rect),
    PopClip,
    StrokePath(Path, f64, Srgb),
    StrokeSegments(usize, Srgb, Option<f64>),
}

/// Surface that remembers every call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Surface for Recorder {
    fn set_transform(&mut self, transform: DAffine2) {
        self.ops.push(Op::Transform(transform));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb) {
        self.ops.push(Op::FillCircle(center, radius, color));
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, _width: f64, color: Srgb) {
        self.ops.push(Op::StrokeCircle(center, radius, color));
    }

    fn fill_oval(&mut self, bounds: Rect, color: Srgb) {
        self.ops.push(Op::FillOval(bounds, color));
    }

    fn fill_round_rect(&mut self, bounds: Rect, corner: f64, color: Srgb) {
        self.ops.push(Op::FillRoundRect(bounds, corner, color));
    }

    fn push_clip_out(&mut self, rect: Rect) {
        self.ops.push(Op::PushClipOut(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(Op::PopClip);
    }

    fn stroke_path(&mut self, path: &Path, width: f64, color: Srgb) {
        self.ops.push(Op::StrokePath(path.clone(), width, color));
    }

    fn stroke_segments(
        &mut self,
        segments: &[(DVec2, DVec2)],
        _width: f64,
        color: Srgb,
        dash: Option<f64>,
    ) {
        self.ops.push(Op::StrokeSegments(segments.len(), color, dash));
    }
}

/// Stroke that logs its widths and forwards the bare path to the surface, so
/// limb strokes show up in the surface's op order.
#[derive(Debug, Default)]
pub struct RecordingStroke {
    pub min_step: f64,
    pub dotted: bool,
    pub widths: RefCell<Vec<(f64, f64)>>,
}

impl TaperedStroke for RecordingStroke {
    fn set_min_step(&mut self, step: f64) {
        self.min_step = step;
    }

    fn min_step(&self) -> f64 {
        self.min_step
    }

    fn set_dotted(&mut self, dotted: bool) {
        self.dotted = dotted;
    }

    fn is_dotted(&self) -> bool {
        self.dotted
    }

    fn stroke(
        &self,
        surface: &mut dyn Surface,
        path: &Path,
        start_width: f64,
        end_width: f64,
        color: Srgb,
    ) {
        self.widths.borrow_mut().push((start_width, end_width));
        surface.stroke_path(path, start_width, color);
    }
}
