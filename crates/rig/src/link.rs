//! A single limb joint.
//!
//! A [`SpringLink`] is a point (its *start*) plus a fixed offset to its *end*.
//! In Locked state the start teleports to every target; in Free state two
//! scalar springs pull it toward the target over subsequent steps. Links do
//! not know their successor: the owning [`ArmChain`](crate::arm::ArmChain)
//! pushes each link's end into the next link by index.

use glam::DVec2;

use crate::spring::{SpringAxis, StiffnessTier, DAMPING_RATIO_LOW_BOUNCY};

/// One spring-driven joint with a fixed start-to-end offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringLink {
    x: SpringAxis,
    y: SpringAxis,
    offset: DVec2,
    locked: bool,
}

impl SpringLink {
    /// A free link resting at `start`.
    pub fn new(tier: StiffnessTier, start: DVec2, offset: DVec2) -> Self {
        let k = tier.stiffness();
        Self {
            x: SpringAxis::new(start.x, k, DAMPING_RATIO_LOW_BOUNCY),
            y: SpringAxis::new(start.y, k, DAMPING_RATIO_LOW_BOUNCY),
            offset,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Switches between rigid and spring-driven positioning.
    ///
    /// The current position is kept; locking also drops any in-flight spring
    /// motion so a later unlock starts from rest.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            let start = self.start();
            self.set_start(start);
        }
    }

    /// Teleports the start to `target` when locked, otherwise retargets the springs.
    pub fn animate_to(&mut self, target: DVec2) {
        if self.locked {
            self.set_start(target);
        } else {
            self.x.animate_to(target.x);
            self.y.animate_to(target.y);
        }
    }

    /// Places the start at `p` immediately, whatever the lock state.
    pub fn set_start(&mut self, p: DVec2) {
        self.x.snap_to(p.x);
        self.y.snap_to(p.y);
    }

    /// One integration step of `dt` seconds. Returns true if the joint moved.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.locked {
            return false;
        }
        let moved_x = self.x.step(dt);
        let moved_y = self.y.step(dt);
        moved_x || moved_y
    }

    /// True when neither axis is still animating.
    pub fn is_at_rest(&self) -> bool {
        !self.x.is_running() && !self.y.is_running()
    }

    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Where the springs are heading.
    pub fn target(&self) -> DVec2 {
        DVec2::new(self.x.target(), self.y.target())
    }

    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x.value(), self.y.value())
    }

    pub fn end(&self) -> DVec2 {
        self.start() + self.offset
    }

    pub fn mid(&self) -> DVec2 {
        self.start() + 0.5 * self.offset
    }
}
