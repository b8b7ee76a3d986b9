//! Wandering motion and blink timing.
//!
//! [`DriftController`] integrates the body's velocity once per frame: a slow
//! sinusoidal horizontal push, constant sinking, a strong upward impulse every
//! 5 to 10 seconds, and a vertical wrap that relaunches the body when it sinks
//! below the viewport or sends it back down after it leaves through the top.
//! Blinks start with a fixed per-frame probability and last 200 ms.

use glam::DVec2;
use ocquarium_core::RandomSource;

use crate::octopus::Octopus;
use crate::transform::BASE_SCALE;

/// Fall-speed cap, logical units per second (positive is down).
pub const MAX_VY: f64 = 35.0;
/// Vertical velocity set by a jump.
pub const JUMP_VY: f64 = -100.0;
/// Horizontal speed cap.
pub const MAX_VX: f64 = 15.0;
/// Constant downward acceleration.
pub const FALL_ACCEL: f64 = 30.0;
/// Angular frequency of the horizontal push, radians per second.
const SWAY_RATE: f64 = 0.25;
/// Bounds of the interval between scheduled jumps.
pub const JUMP_INTERVAL_MS: (f64, f64) = (5000.0, 10000.0);
/// How long the eyes stay closed.
pub const BLINK_DURATION_MS: u64 = 200;

/// What happened during one [`DriftController::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriftStep {
    /// A scheduled jump fired.
    pub jumped: bool,
    /// The body sank out of view and was relaunched upward.
    pub forced_ascent: bool,
    /// The body left through the top and was sent back down.
    pub forced_descent: bool,
    /// `Some(true)` if a blink started, `Some(false)` if one ended.
    pub blink: Option<bool>,
}

/// Per-session drift state. Created when drift starts, dropped when it stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftController {
    velocity: DVec2,
    next_jump_ms: u64,
    unblink_ms: Option<u64>,
}

/// `v < lo ? lo : min(v, hi)`; tolerates `hi < lo` (e.g. before the first resize).
fn clamp_lenient(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else {
        v.min(hi)
    }
}

impl DriftController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current velocity in logical units per second.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Elapsed time after which the next jump fires.
    pub fn next_jump_ms(&self) -> u64 {
        self.next_jump_ms
    }

    /// Deadline of the current blink, if one is active.
    pub fn unblink_ms(&self) -> Option<u64> {
        self.unblink_ms
    }

    /// Advances the drift by one frame and moves the octopus.
    ///
    /// `elapsed_ms` counts from the start of this drift session; `delta_ms`
    /// is the time since the previous frame.
    pub fn tick(
        &mut self,
        elapsed_ms: u64,
        delta_ms: u64,
        octopus: &mut Octopus,
        rng: &mut impl RandomSource,
    ) -> DriftStep {
        let mut report = DriftStep::default();
        let t = elapsed_ms as f64 / 1000.0;
        let dt = delta_ms as f64 / 1000.0;

        if elapsed_ms > self.next_jump_ms {
            self.velocity.y = JUMP_VY;
            let (lo, hi) = JUMP_INTERVAL_MS;
            self.next_jump_ms = elapsed_ms + rng.next_range(lo, hi) as u64;
            report.jumped = true;
            log::trace!("jump at {elapsed_ms} ms, next at {} ms", self.next_jump_ms);
        }

        match self.unblink_ms {
            Some(deadline) if elapsed_ms > deadline => {
                octopus.set_blinking(false);
                self.unblink_ms = None;
                report.blink = Some(false);
            }
            _ => {
                if rng.next_f64() < octopus.config().blink_probability() {
                    octopus.set_blinking(true);
                    self.unblink_ms = Some(elapsed_ms + BLINK_DURATION_MS);
                    report.blink = Some(true);
                }
            }
        }

        let ax = MAX_VX * (SWAY_RATE * t).sin();
        self.velocity.x = (self.velocity.x + ax * dt).clamp(-MAX_VX, MAX_VX);
        // Only the upper (fall-speed) bound is ever reached.
        self.velocity.y = (self.velocity.y + FALL_ACCEL * dt).clamp(-100.0 * MAX_VY, MAX_VY);

        let mut p = octopus.anchor();
        let bounds = octopus.bounds();
        if p.y - BASE_SCALE / 2.0 > bounds.y {
            self.velocity.y = JUMP_VY;
            report.forced_ascent = true;
        } else if p.y + BASE_SCALE < 0.0 {
            self.velocity.y = MAX_VY;
            report.forced_descent = true;
        }

        p.x = clamp_lenient(p.x + self.velocity.x * dt, 0.0, bounds.x);
        p.y += self.velocity.y * dt;

        octopus.set_anchor_logical(p);
        octopus.reposition_arms();
        report
    }
}
