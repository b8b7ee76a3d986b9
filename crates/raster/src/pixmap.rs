//! CPU raster surface backed by `tiny-skia`.
//!
//! Fills and strokes are anti-aliased. Clip-outs are kept as rectangles with
//! the transform in force when they were pushed, and folded into an inverted
//! coverage mask that every draw call is filtered through.

use crate::geometry::{round_rect, segments_path, to_path, to_rect, to_transform};
use glam::{DAffine2, DVec2};
use ocquarium_core::{check_pixel_count, Path, Rect, RigError, Srgb, Surface};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Stroke, StrokeDash, Transform,
};

/// An RGBA8 image that implements [`Surface`].
#[derive(Debug, Clone)]
pub struct Pixmap {
    canvas: tiny_skia::Pixmap,
    transform: Transform,
    clips: Vec<(Transform, Rect)>,
    mask: Option<Mask>,
}

impl Pixmap {
    /// Creates an opaque pixmap filled with `background`.
    ///
    /// Returns `RigError::InvalidDimensions` if either side is zero or the
    /// canvas is larger than [`ocquarium_core::MAX_PIXELS`].
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, RigError> {
        check_pixel_count(width, height)?;
        let w = u32::try_from(width).map_err(|_| RigError::InvalidDimensions)?;
        let h = u32::try_from(height).map_err(|_| RigError::InvalidDimensions)?;
        let mut canvas = tiny_skia::Pixmap::new(w, h).ok_or(RigError::InvalidDimensions)?;
        canvas.fill(color(background));
        Ok(Self {
            canvas,
            transform: Transform::identity(),
            clips: Vec::new(),
            mask: None,
        })
    }

    pub fn width(&self) -> usize {
        self.canvas.width() as usize
    }

    pub fn height(&self) -> usize {
        self.canvas.height() as usize
    }

    /// Repaints every pixel and drops any pending clips.
    pub fn clear(&mut self, background: Srgb) {
        self.canvas.fill(color(background));
        self.clips.clear();
        self.mask = None;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.canvas.width() {
            return None;
        }
        let c = self.canvas.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.canvas
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    fn fill(&mut self, path: &tiny_skia::Path, c: Srgb) {
        self.canvas.fill_path(
            path,
            &paint(c),
            FillRule::Winding,
            self.transform,
            self.mask.as_ref(),
        );
    }

    fn stroke(&mut self, path: &tiny_skia::Path, stroke: &Stroke, c: Srgb) {
        self.canvas
            .stroke_path(path, &paint(c), stroke, self.transform, self.mask.as_ref());
    }

    /// Rebuilds the mask as everything outside the union of the clip rects.
    fn rebuild_mask(&mut self) {
        if self.clips.is_empty() {
            self.mask = None;
            return;
        }
        let Some(mut mask) = Mask::new(self.canvas.width(), self.canvas.height()) else {
            return;
        };
        for (transform, rect) in &self.clips {
            if let Some(r) = to_rect(*rect) {
                mask.fill_path(&PathBuilder::from_rect(r), FillRule::Winding, true, *transform);
            }
        }
        mask.invert();
        self.mask = Some(mask);
    }
}

fn color(c: Srgb) -> Color {
    let [r, g, b] = c.to_rgb8();
    Color::from_rgba8(r, g, b, 255)
}

fn paint(c: Srgb) -> Paint<'static> {
    let [r, g, b] = c.to_rgb8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

impl Surface for Pixmap {
    fn set_transform(&mut self, transform: DAffine2) {
        self.transform = to_transform(transform);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, c: Srgb) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.fill(&path, c);
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, width: f64, c: Srgb) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.stroke(&path, &round_stroke(width), c);
        }
    }

    fn fill_oval(&mut self, bounds: Rect, c: Srgb) {
        if let Some(path) = to_rect(bounds).and_then(PathBuilder::from_oval) {
            self.fill(&path, c);
        }
    }

    fn fill_round_rect(&mut self, bounds: Rect, corner: f64, c: Srgb) {
        if let Some(path) = round_rect(bounds, corner) {
            self.fill(&path, c);
        }
    }

    fn push_clip_out(&mut self, rect: Rect) {
        self.clips.push((self.transform, rect));
        self.rebuild_mask();
    }

    fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            log::warn!("pop_clip without a matching push_clip_out");
            return;
        }
        self.rebuild_mask();
    }

    fn stroke_path(&mut self, path: &Path, width: f64, c: Srgb) {
        if let Some(path) = to_path(path) {
            self.stroke(&path, &round_stroke(width), c);
        }
    }

    fn stroke_segments(
        &mut self,
        segments: &[(DVec2, DVec2)],
        width: f64,
        c: Srgb,
        dash: Option<f64>,
    ) {
        let Some(path) = segments_path(segments) else {
            return;
        };
        let mut stroke = round_stroke(width);
        stroke.dash = dash
            .filter(|&on| on > 0.0)
            .and_then(|on| StrokeDash::new(vec![on as f32, on as f32], 0.0));
        self.stroke(&path, &stroke, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Srgb = Srgb::from_rgb8(0xff, 0x00, 0x00);

    fn canvas(w: usize, h: usize) -> Pixmap {
        Pixmap::new(w, h, Srgb::WHITE).unwrap()
    }

    fn is_red(p: &Pixmap, x: usize, y: usize) -> bool {
        p.pixel(x, y) == Some([0xff, 0, 0, 0xff])
    }

    fn is_white(p: &Pixmap, x: usize, y: usize) -> bool {
        p.pixel(x, y) == Some([0xff, 0xff, 0xff, 0xff])
    }

    #[test]
    fn new_rejects_zero_overflow_and_huge() {
        assert!(Pixmap::new(0, 4, Srgb::BLACK).is_err());
        assert!(Pixmap::new(4, 0, Srgb::BLACK).is_err());
        assert!(Pixmap::new(usize::MAX, 2, Srgb::BLACK).is_err());
        assert!(matches!(
            Pixmap::new(100_000, 100_000, Srgb::BLACK),
            Err(RigError::InvalidDimensions)
        ));
    }

    #[test]
    fn to_rgba_has_four_bytes_per_pixel_and_opaque_alpha() {
        let p = Pixmap::new(8, 4, Srgb::from_rgb8(1, 2, 3)).unwrap();
        let buf = p.to_rgba();
        assert_eq!(buf.len(), 8 * 4 * 4);
        assert_eq!(&buf[..4], &[1, 2, 3, 255]);
        assert!(buf.chunks(4).all(|px| px[3] == 255));
        assert_eq!(p.pixel(8, 0), None);
        assert_eq!(p.pixel(0, 4), None);
    }

    #[test]
    fn fill_circle_respects_radius() {
        let mut p = canvas(20, 20);
        p.fill_circle(DVec2::new(10.0, 10.0), 4.0, RED);
        assert!(is_red(&p, 10, 10));
        assert!(is_red(&p, 12, 10));
        assert!(is_white(&p, 15, 10));
        assert!(is_white(&p, 0, 0));
    }

    #[test]
    fn circle_edges_are_anti_aliased() {
        let mut p = canvas(30, 20);
        p.fill_circle(DVec2::new(10.0, 10.0), 4.5, RED);
        // The pixel at x 14 straddles the edge at 14.5.
        let [r, g, b, _] = p.pixel(14, 10).unwrap();
        assert!(g > 0 && g < 0xff, "g = {g}");
        assert!(r > g);
        assert_eq!(g, b);
    }

    #[test]
    fn transform_scales_logical_shapes() {
        let mut p = canvas(40, 40);
        p.set_transform(DAffine2::from_scale(DVec2::splat(4.0)));
        p.fill_circle(DVec2::new(5.0, 5.0), 2.0, RED);
        assert!(is_red(&p, 20, 20));
        assert!(is_red(&p, 26, 20));
        assert!(is_white(&p, 29, 20));
    }

    #[test]
    fn clip_out_protects_band_until_popped() {
        let mut p = canvas(20, 20);
        p.push_clip_out(Rect::from_ltrb(0.0, 8.0, 20.0, 12.0));
        p.fill_oval(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), RED);
        p.pop_clip();
        assert!(is_red(&p, 10, 5));
        assert!(is_white(&p, 10, 10));
        assert!(is_red(&p, 10, 14));

        p.fill_oval(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), RED);
        assert!(is_red(&p, 10, 10));
    }

    #[test]
    fn clip_out_uses_the_transform_at_push_time() {
        let mut p = canvas(40, 40);
        p.set_transform(DAffine2::from_scale(DVec2::splat(2.0)));
        p.push_clip_out(Rect::from_ltrb(0.0, 8.0, 20.0, 12.0));
        p.set_transform(DAffine2::IDENTITY);
        p.fill_round_rect(Rect::from_ltrb(0.0, 0.0, 40.0, 40.0), 0.0, RED);
        p.pop_clip();
        assert!(is_red(&p, 20, 10));
        assert!(is_white(&p, 20, 20));
        assert!(is_red(&p, 20, 30));
    }

    #[test]
    fn pop_without_push_is_ignored() {
        let mut p = canvas(10, 10);
        p.pop_clip();
        p.fill_circle(DVec2::new(5.0, 5.0), 3.0, RED);
        assert!(is_red(&p, 5, 5));
    }

    #[test]
    fn stroke_circle_leaves_centre_empty() {
        let mut p = canvas(30, 30);
        p.stroke_circle(DVec2::new(15.0, 15.0), 10.0, 4.0, RED);
        assert!(is_white(&p, 15, 15));
        assert!(is_red(&p, 24, 15));
    }

    #[test]
    fn round_rect_trims_corners() {
        let mut p = canvas(20, 20);
        p.fill_round_rect(Rect::from_ltrb(0.0, 0.0, 20.0, 20.0), 6.0, RED);
        assert!(is_red(&p, 10, 10));
        assert!(is_red(&p, 1, 10));
        assert!(is_white(&p, 0, 0));
    }

    #[test]
    fn dashed_segments_leave_gaps() {
        let mut p = canvas(40, 5);
        p.stroke_segments(
            &[(DVec2::new(0.0, 2.5), DVec2::new(40.0, 2.5))],
            2.0,
            RED,
            Some(6.0),
        );
        assert!(is_red(&p, 2, 2));
        assert!(is_white(&p, 9, 2));
        assert!(is_red(&p, 14, 2));
    }

    #[test]
    fn stroke_path_covers_the_curve() {
        let mut p = canvas(40, 40);
        let path = Path::move_to(DVec2::new(5.0, 20.0)).quad_to(
            DVec2::new(20.0, 20.0),
            DVec2::new(35.0, 20.0),
        );
        p.stroke_path(&path, 2.0, RED);
        for x in [5, 15, 25, 34] {
            assert!(is_red(&p, x, 20), "x = {x}");
        }
        assert!(is_white(&p, 20, 25));
    }

    #[test]
    fn shapes_outside_the_canvas_are_ignored() {
        let mut p = canvas(10, 10);
        p.fill_circle(DVec2::new(-100.0, -100.0), 5.0, RED);
        p.fill_circle(DVec2::new(1e9, 1e9), 5.0, RED);
        assert!(p.to_rgba().chunks(4).all(|px| px == [255, 255, 255, 255]));
    }
}
