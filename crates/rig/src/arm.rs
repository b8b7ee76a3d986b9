//! One limb: three joints chained base to tip.
//!
//! The chain owns its joints by index. Joint 0 is always locked to the body;
//! joints 1 and 2 share a lock flag. Updates flow forward only: every pass
//! pushes `links[i].end()` into `links[i + 1]`, so a locked chain moves as one
//! rigid body within a single call while a free chain trails behind its base.

use glam::DVec2;
use ocquarium_core::{Path, Srgb, Surface, TaperedStroke};

use crate::link::SpringLink;
use crate::spring::StiffnessTier;

/// Joints per limb.
pub const JOINTS: usize = 3;

const DEBUG_PATH_COLOR: Srgb = Srgb::from_rgb8(0x33, 0x66, 0x99);
const DEBUG_CHORD_COLOR: Srgb = Srgb::from_rgb8(0xff, 0xff, 0x00);
const DEBUG_OFFSET_COLOR: Srgb = Srgb::from_rgb8(0x00, 0xcc, 0xff);
const DEBUG_MARKER_COLOR: Srgb = Srgb::from_rgb8(0xcc, 0xee, 0xff);
const DEBUG_LINE_WIDTH: f64 = 0.75;
const DEBUG_DASH: f64 = 2.0;
const DEBUG_MARKER_RADIUS: f64 = 2.0;

/// A three-joint spring chain with a render taper.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmChain {
    links: [SpringLink; JOINTS],
    max_width: f64,
    min_width: f64,
}

impl ArmChain {
    /// Builds a limb at `origin` whose joints start at the running sum of `offsets`.
    pub fn new(origin: DVec2, offsets: [DVec2; JOINTS], max_width: f64, min_width: f64) -> Self {
        let mut start = origin;
        let links = std::array::from_fn(|i| {
            let link = SpringLink::new(StiffnessTier::for_joint(i), start, offsets[i]);
            start += offsets[i];
            link
        });
        let mut arm = Self {
            links,
            max_width,
            min_width,
        };
        arm.links[0].set_locked(true);
        arm
    }

    pub fn links(&self) -> &[SpringLink; JOINTS] {
        &self.links
    }

    /// `(min_width, max_width)` of the taper.
    pub fn widths(&self) -> (f64, f64) {
        (self.min_width, self.max_width)
    }

    /// Locks or frees joints 1 and 2 together; joint 0 stays locked.
    pub fn set_locked(&mut self, rigid: bool) {
        for link in &mut self.links[1..] {
            link.set_locked(rigid);
        }
    }

    pub fn is_locked(&self) -> bool {
        self.links[1].is_locked()
    }

    /// Teleports the base joint to `anchor` and propagates down the chain.
    pub fn set_anchor(&mut self, anchor: DVec2) {
        self.links[0].set_start(anchor);
        self.propagate();
    }

    /// One integration step for every joint followed by one forward pass.
    /// Returns true if any joint moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut moved = false;
        for link in &mut self.links {
            moved |= link.step(dt);
        }
        self.propagate();
        moved
    }

    pub fn is_at_rest(&self) -> bool {
        self.links.iter().all(SpringLink::is_at_rest)
    }

    fn propagate(&mut self) {
        for i in 0..JOINTS - 1 {
            let end = self.links[i].end();
            self.links[i + 1].animate_to(end);
        }
    }

    /// Two quadratic segments through all three joints with no slope break at
    /// the middle joint's midpoint.
    pub fn curve(&self) -> Path {
        let [a, b, c] = &self.links;
        Path::move_to(a.start())
            .quad_to(b.start(), b.mid())
            .quad_to(b.end(), c.end())
    }

    /// Strokes the limb thick at the base and thin at the tip.
    pub fn render(&self, surface: &mut dyn Surface, stroke: &dyn TaperedStroke, color: Srgb) {
        stroke.stroke(surface, &self.curve(), self.max_width, self.min_width, color);
    }

    /// Raw curve, joint offsets, chords between joints and joint markers.
    pub fn render_debug(&self, surface: &mut dyn Surface) {
        let [a, b, c] = &self.links;
        surface.stroke_path(&self.curve(), DEBUG_LINE_WIDTH, DEBUG_PATH_COLOR);
        surface.stroke_segments(
            &[(a.end(), b.start()), (b.end(), c.start())],
            DEBUG_LINE_WIDTH,
            DEBUG_CHORD_COLOR,
            Some(DEBUG_DASH),
        );
        surface.stroke_segments(
            &[(a.start(), a.end()), (b.start(), b.end()), (c.start(), c.end())],
            DEBUG_LINE_WIDTH,
            DEBUG_OFFSET_COLOR,
            None,
        );
        for p in [b.start(), c.start()] {
            surface.stroke_circle(p, DEBUG_MARKER_RADIUS, DEBUG_LINE_WIDTH, DEBUG_MARKER_COLOR);
        }
        for p in [a.start(), b.mid(), c.end()] {
            surface.fill_circle(p, DEBUG_MARKER_RADIUS, DEBUG_MARKER_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.016;

    fn offsets() -> [DVec2; JOINTS] {
        [
            DVec2::new(5.0, 30.0),
            DVec2::new(-20.0, 50.0),
            DVec2::new(10.0, -30.0),
        ]
    }

    fn arm() -> ArmChain {
        ArmChain::new(DVec2::ZERO, offsets(), 14.0, 2.0)
    }

    fn assert_rigid(arm: &ArmChain) {
        let l = arm.links();
        for i in 0..JOINTS - 1 {
            assert!(
                (l[i + 1].start() - l[i].end()).length() < 1e-12,
                "joint {} not at end of joint {i}",
                i + 1
            );
        }
    }

    #[test]
    fn new_places_joints_at_running_offsets() {
        let a = ArmChain::new(DVec2::new(1.0, 1.0), offsets(), 14.0, 2.0);
        assert_eq!(a.links()[0].start(), DVec2::new(1.0, 1.0));
        assert_eq!(a.links()[1].start(), DVec2::new(6.0, 31.0));
        assert_eq!(a.links()[2].start(), DVec2::new(-14.0, 81.0));
        assert_rigid(&a);
    }

    #[test]
    fn base_is_locked_and_rest_is_free() {
        let a = arm();
        assert!(a.links()[0].is_locked());
        assert!(!a.is_locked());
        assert!(!a.links()[2].is_locked());
    }

    #[test]
    fn set_locked_never_unlocks_base() {
        let mut a = arm();
        a.set_locked(true);
        assert!(a.links().iter().all(SpringLink::is_locked));
        a.set_locked(false);
        assert!(a.links()[0].is_locked());
        assert!(!a.links()[1].is_locked() && !a.links()[2].is_locked());
    }

    #[test]
    fn locked_set_anchor_moves_whole_limb_rigidly() {
        let mut a = arm();
        a.set_locked(true);
        a.set_anchor(DVec2::new(200.0, 426.0));
        assert_eq!(a.links()[0].start(), DVec2::new(200.0, 426.0));
        assert_rigid(&a);
        let pose: Vec<DVec2> = a.links().iter().map(SpringLink::start).collect();
        for _ in 0..200 {
            assert!(!a.advance(DT));
        }
        let after: Vec<DVec2> = a.links().iter().map(SpringLink::start).collect();
        assert_eq!(pose, after);
    }

    #[test]
    fn free_set_anchor_moves_only_the_base_immediately() {
        let mut a = arm();
        let before = [a.links()[1].start(), a.links()[2].start()];
        a.set_anchor(DVec2::new(100.0, 0.0));
        assert_eq!(a.links()[0].start(), DVec2::new(100.0, 0.0));
        assert_eq!(a.links()[1].start(), before[0]);
        assert_eq!(a.links()[2].start(), before[1]);
        assert_eq!(a.links()[1].target(), a.links()[0].end());
    }

    #[test]
    fn free_limb_converges_back_to_rigid_pose() {
        let mut a = arm();
        a.set_anchor(DVec2::new(150.0, -80.0));
        let gap = |a: &ArmChain| {
            let l = a.links();
            (l[1].start() - l[0].end()).length() + (l[2].start() - l[1].end()).length()
        };
        let initial = gap(&a);
        let mut steps = 0;
        while !a.is_at_rest() && steps < 3000 {
            a.advance(DT);
            steps += 1;
            assert!(gap(&a) <= initial * 1.5, "chain diverged at step {steps}");
        }
        assert!(a.is_at_rest(), "limb never settled");
        assert_rigid(&a);
    }

    #[test]
    fn advance_on_rested_limb_reports_no_motion() {
        let mut a = arm();
        assert!(!a.advance(DT));
    }

    #[test]
    fn curve_passes_through_base_mid_and_tip() {
        let a = arm();
        let l = a.links();
        let path = a.curve();
        assert_eq!(path.start(), l[0].start());
        let q = path.quads();
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].ctrl, l[1].start());
        assert_eq!(q[0].to, l[1].mid());
        assert_eq!(q[1].ctrl, l[1].end());
        assert_eq!(q[1].to, l[2].end());
    }

    #[test]
    fn curve_is_smooth_at_the_junction() {
        let a = arm();
        let q = a.curve().quads().to_vec();
        let incoming = (q[0].to - q[0].ctrl).normalize();
        let outgoing = (q[1].ctrl - q[0].to).normalize();
        assert!(incoming.dot(outgoing) > 1.0 - 1e-12);
    }

    #[test]
    fn widths_are_min_then_max() {
        assert_eq!(arm().widths(), (2.0, 14.0));
    }
}
