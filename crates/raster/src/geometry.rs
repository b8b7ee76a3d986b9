//! Conversions from rig geometry to `tiny-skia`, plus arc-length sampling of
//! limb paths.

use glam::{DAffine2, DVec2};
use ocquarium_core::{Path, Rect};
use tiny_skia::{PathBuilder, Transform};
use tiny_skia_path::path_geometry::{CubicCoeff, QuadCoeff};
use tiny_skia_path::{f32x2, PathSegment, Point};

/// Evaluations per curve segment when measuring arc length.
const MEASURE_STEPS: usize = 32;
/// Cubic handle length for a quarter circle of unit radius.
const KAPPA: f64 = 0.552_284_749_8;

pub fn to_transform(t: DAffine2) -> Transform {
    Transform::from_row(
        t.matrix2.x_axis.x as f32,
        t.matrix2.x_axis.y as f32,
        t.matrix2.y_axis.x as f32,
        t.matrix2.y_axis.y as f32,
        t.translation.x as f32,
        t.translation.y as f32,
    )
}

/// `None` for empty or non-finite rectangles.
pub fn to_rect(r: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(r.min.x as f32, r.min.y as f32, r.max.x as f32, r.max.y as f32)
}

fn point(p: DVec2) -> Point {
    Point::from_xy(p.x as f32, p.y as f32)
}

fn vec2(p: Point) -> DVec2 {
    DVec2::new(f64::from(p.x), f64::from(p.y))
}

/// The limb path as a `tiny-skia` path. A bare move-to becomes a zero-length
/// line so round caps still draw a dot.
pub fn to_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let start = point(path.start());
    pb.move_to(start.x, start.y);
    if path.quads().is_empty() {
        pb.line_to(start.x, start.y);
    }
    for q in path.quads() {
        let (c, to) = (point(q.ctrl), point(q.to));
        pb.quad_to(c.x, c.y, to.x, to.y);
    }
    pb.finish()
}

/// Straight line segments, one contour each.
pub fn segments_path(segments: &[(DVec2, DVec2)]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for &(a, b) in segments {
        let (a, b) = (point(a), point(b));
        pb.move_to(a.x, a.y);
        pb.line_to(b.x, b.y);
    }
    pb.finish()
}

fn cubic(pb: &mut PathBuilder, c1: DVec2, c2: DVec2, to: DVec2) {
    let (c1, c2, to) = (point(c1), point(c2), point(to));
    pb.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
}

/// Rectangle with quarter-circle corners of radius `corner`, clamped to fit.
pub fn round_rect(r: Rect, corner: f64) -> Option<tiny_skia::Path> {
    let half = r.size() / 2.0;
    let c = corner.clamp(0.0, half.x.min(half.y));
    if c == 0.0 {
        return to_rect(r).map(PathBuilder::from_rect);
    }
    let h = c * KAPPA;
    let (l, t, rt, b) = (r.min.x, r.min.y, r.max.x, r.max.y);
    let v = DVec2::new;

    // Clockwise from the left end of the top edge.
    let mut pb = PathBuilder::new();
    let start = point(v(l + c, t));
    pb.move_to(start.x, start.y);
    pb.line_to((rt - c) as f32, t as f32);
    cubic(&mut pb, v(rt - c + h, t), v(rt, t + c - h), v(rt, t + c));
    pb.line_to(rt as f32, (b - c) as f32);
    cubic(&mut pb, v(rt, b - c + h), v(rt - c + h, b), v(rt - c, b));
    pb.line_to((l + c) as f32, b as f32);
    cubic(&mut pb, v(l + c - h, b), v(l, b - c + h), v(l, b - c));
    pb.line_to(l as f32, (t + c) as f32);
    cubic(&mut pb, v(l, t + c - h), v(l + c - h, t), v(l + c, t));
    pb.close();
    pb.finish()
}

/// A path measured by arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSampler {
    points: Vec<DVec2>,
    cumulative: Vec<f64>,
}

impl ArcSampler {
    pub fn new(path: &tiny_skia::Path) -> Self {
        let mut points: Vec<DVec2> = Vec::new();
        let mut contour_start = DVec2::ZERO;
        for segment in path.segments() {
            let last = points.last().copied().unwrap_or(contour_start);
            match segment {
                PathSegment::MoveTo(p) => {
                    contour_start = vec2(p);
                    points.push(contour_start);
                }
                PathSegment::LineTo(p) => points.push(vec2(p)),
                PathSegment::QuadTo(c, p) => {
                    let coeff = QuadCoeff::from_points(&[point(last), c, p]);
                    points.extend(sample(|t| coeff.eval(t)));
                }
                PathSegment::CubicTo(c1, c2, p) => {
                    let coeff = CubicCoeff::from_points(&[point(last), c1, c2, p]);
                    points.extend(sample(|t| coeff.eval(t)));
                }
                PathSegment::Close => points.push(contour_start),
            }
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += p.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at arc length `distance`, clamped to the ends.
    pub fn point_at(&self, distance: f64) -> DVec2 {
        let Some(&first) = self.points.first() else {
            return DVec2::ZERO;
        };
        if distance <= 0.0 {
            return first;
        }
        let idx = self.cumulative.partition_point(|&c| c < distance);
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let seg_start = self.cumulative[idx - 1];
        let seg_len = self.cumulative[idx] - seg_start;
        if seg_len <= f64::EPSILON {
            return self.points[idx];
        }
        self.points[idx - 1].lerp(self.points[idx], (distance - seg_start) / seg_len)
    }
}

fn sample(eval: impl Fn(f32x2) -> f32x2) -> impl Iterator<Item = DVec2> {
    (1..=MEASURE_STEPS).map(move |i| {
        let p = eval(f32x2::splat(i as f32 / MEASURE_STEPS as f32));
        DVec2::new(f64::from(p.x()), f64::from(p.y()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2, eps: f64) -> bool {
        a.distance(b) < eps
    }

    #[test]
    fn transform_keeps_scale_and_translation() {
        let t = to_transform(DAffine2::from_scale_angle_translation(
            DVec2::splat(2.5),
            0.0,
            DVec2::new(10.0, -4.0),
        ));
        assert_eq!((t.sx, t.sy, t.tx, t.ty), (2.5, 2.5, 10.0, -4.0));
        assert_eq!((t.kx, t.ky), (0.0, 0.0));
    }

    #[test]
    fn straight_quad_measures_its_chord() {
        let path = Path::move_to(DVec2::ZERO).quad_to(DVec2::new(5.0, 0.0), DVec2::new(10.0, 0.0));
        let arc = ArcSampler::new(&to_path(&path).unwrap());
        assert!((arc.length() - 10.0).abs() < 1e-4);
        assert!(close(arc.point_at(2.5), DVec2::new(2.5, 0.0), 1e-4));
        assert!(close(arc.point_at(99.0), DVec2::new(10.0, 0.0), 1e-6));
        assert!(close(arc.point_at(-1.0), DVec2::ZERO, 1e-9));
    }

    #[test]
    fn curved_quad_is_longer_than_its_chord() {
        let path = Path::move_to(DVec2::ZERO).quad_to(DVec2::new(5.0, 10.0), DVec2::new(10.0, 0.0));
        let arc = ArcSampler::new(&to_path(&path).unwrap());
        assert!(arc.length() > 10.0);
        assert!(close(arc.point_at(arc.length() / 2.0), DVec2::new(5.0, 5.0), 1e-3));
    }

    #[test]
    fn bare_move_to_has_zero_length() {
        let arc = ArcSampler::new(&to_path(&Path::move_to(DVec2::new(1.0, 1.0))).unwrap());
        assert_eq!(arc.length(), 0.0);
        assert!(close(arc.point_at(3.0), DVec2::new(1.0, 1.0), 1e-9));
    }

    #[test]
    fn round_rect_corner_is_clamped() {
        let r = Rect::from_ltrb(0.0, 0.0, 10.0, 4.0);
        let path = round_rect(r, 50.0).unwrap();
        let b = path.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (0.0, 0.0, 10.0, 4.0));
        assert!(round_rect(r, 0.0).is_some());
        assert!(round_rect(Rect::from_ltrb(0.0, 0.0, 0.0, 0.0), 1.0).is_none());
    }
}
