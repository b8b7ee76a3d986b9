//! Logical design space to device pixels.
//!
//! All creature geometry is authored in a fixed logical space where the body
//! spans [`BASE_SCALE`] units. [`Transform2D`] scales that space uniformly onto
//! the device so the creature occupies `size` pixels.

use glam::{DAffine2, DVec2};
use ocquarium_core::RigError;

/// Logical size of the creature; `set_size(px)` maps this many units onto `px` pixels.
pub const BASE_SCALE: f64 = 100.0;

/// Uniform-scale mapping between logical and pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    forward: DAffine2,
    inverse: DAffine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            forward: DAffine2::IDENTITY,
            inverse: DAffine2::IDENTITY,
        }
    }
}

impl Transform2D {
    /// Builds a transform for a nominal pixel size.
    pub fn new(size: f64) -> Result<Self, RigError> {
        let mut t = Self::default();
        t.set_size(size)?;
        Ok(t)
    }

    /// Rescales so that [`BASE_SCALE`] logical units span `size` pixels.
    ///
    /// Returns `RigError::InvalidSize` for zero, negative or non-finite sizes;
    /// the previous mapping is kept in that case.
    pub fn set_size(&mut self, size: f64) -> Result<(), RigError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(RigError::InvalidSize(size));
        }
        let s = size / BASE_SCALE;
        self.forward = DAffine2::from_scale(DVec2::splat(s));
        self.inverse = self.forward.inverse();
        Ok(())
    }

    /// Pixels per logical unit.
    pub fn scale(&self) -> f64 {
        self.forward.matrix2.x_axis.x
    }

    pub fn forward(&self) -> DAffine2 {
        self.forward
    }

    pub fn inverse(&self) -> DAffine2 {
        self.inverse
    }

    pub fn to_logical(&self, pixel: DVec2) -> DVec2 {
        self.inverse.transform_point2(pixel)
    }

    pub fn to_pixel(&self, logical: DVec2) -> DVec2 {
        self.forward.transform_point2(logical)
    }

    /// True iff `pixel` lands strictly within `BASE_SCALE / 2` logical units of `anchor`.
    pub fn hit_test(&self, pixel: DVec2, anchor: DVec2) -> bool {
        self.to_logical(pixel).distance(anchor) < BASE_SCALE / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let t = Transform2D::default();
        let p = DVec2::new(12.5, -3.0);
        assert_eq!(t.to_pixel(p), p);
        assert_eq!(t.to_logical(p), p);
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn size_equal_to_base_scale_is_one_to_one() {
        let t = Transform2D::new(100.0).unwrap();
        assert_eq!(t.to_logical(DVec2::new(400.0, 800.0)), DVec2::new(400.0, 800.0));
    }

    #[test]
    fn set_size_scales_uniformly() {
        let t = Transform2D::new(300.0).unwrap();
        assert!((t.scale() - 3.0).abs() < 1e-12);
        let px = t.to_pixel(DVec2::new(10.0, 20.0));
        assert!((px - DVec2::new(30.0, 60.0)).length() < 1e-12);
    }

    #[test]
    fn inverse_undoes_forward() {
        let t = Transform2D::new(275.0).unwrap();
        let product = t.forward() * t.inverse();
        let p = DVec2::new(-17.0, 42.0);
        assert!((product.transform_point2(p) - p).length() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_size_and_keeps_mapping() {
        let mut t = Transform2D::new(200.0).unwrap();
        assert!(matches!(t.set_size(0.0), Err(RigError::InvalidSize(_))));
        assert!(t.set_size(-5.0).is_err());
        assert!(t.set_size(f64::INFINITY).is_err());
        assert!(t.set_size(f64::NAN).is_err());
        assert!((t.scale() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn point_at_anchor_hits() {
        let t = Transform2D::new(250.0).unwrap();
        let anchor = DVec2::new(80.0, 120.0);
        assert!(t.hit_test(t.to_pixel(anchor), anchor));
    }

    #[test]
    fn hit_radius_is_half_base_scale_in_logical_units() {
        let t = Transform2D::new(200.0).unwrap();
        let anchor = DVec2::new(50.0, 50.0);
        let inside = anchor + DVec2::new(BASE_SCALE / 2.0 - 1e-6, 0.0);
        let edge = anchor + DVec2::new(BASE_SCALE / 2.0, 0.0);
        let outside = anchor + DVec2::new(0.0, BASE_SCALE / 2.0 + 1e-6);
        assert!(t.hit_test(t.to_pixel(inside), anchor));
        assert!(!t.hit_test(t.to_pixel(edge), anchor));
        assert!(!t.hit_test(t.to_pixel(outside), anchor));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_is_exact_within_epsilon(
                size in 1e-2_f64..1e5,
                x in -1e4_f64..1e4,
                y in -1e4_f64..1e4,
            ) {
                let t = Transform2D::new(size).unwrap();
                let p = DVec2::new(x, y);
                let back = t.to_logical(t.to_pixel(p));
                prop_assert!((back - p).length() <= 1e-9 * (1.0 + p.length()), "{p} -> {back}");
            }

            #[test]
            fn far_points_never_hit(
                size in 1.0_f64..1e4,
                angle in 0.0_f64..std::f64::consts::TAU,
                extra in 1e-6_f64..1e3,
            ) {
                let t = Transform2D::new(size).unwrap();
                let anchor = DVec2::new(10.0, -20.0);
                let logical = anchor + DVec2::from_angle(angle) * (BASE_SCALE / 2.0 + extra);
                prop_assert!(!t.hit_test(t.to_pixel(logical), anchor));
            }
        }
    }
}
