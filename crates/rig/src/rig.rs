//! Host-facing handle tying the creature to a frame ticker and a canvas.
//!
//! A [`Rig`] owns the [`Octopus`], its [`Transform2D`], the injected random
//! source and, while drifting, a [`DriftController`]. Hosts call
//! [`Rig::on_frame`] once per display refresh and [`Rig::draw`] whenever
//! [`Rig::take_redraw`] reports a change.

use glam::DVec2;
use ocquarium_core::{OctopusConfig, RandomSource, RigError, Surface, TaperedStroke, Xorshift64};

use crate::drift::{DriftController, DriftStep};
use crate::octopus::Octopus;
use crate::transform::{Transform2D, BASE_SCALE};

/// Stroke sampling step in device pixels for solid tentacles.
const TENTACLE_STEP_PX: f64 = 8.0;
/// Stroke sampling step in device pixels for dotted particle limbs.
const PARTICLE_STEP_PX: f64 = 20.0;

#[derive(Debug, Clone)]
struct DriftSession {
    controller: DriftController,
    /// Ticker time of the first frame of this session.
    origin_ms: Option<u64>,
}

/// The animated creature as seen by a host shell.
#[derive(Debug, Clone)]
pub struct Rig<R: RandomSource = Xorshift64> {
    octopus: Octopus,
    transform: Transform2D,
    drift: Option<DriftSession>,
    rng: R,
    min_step: f64,
}

impl Rig<Xorshift64> {
    /// Rig seeded with a [`Xorshift64`].
    pub fn with_seed(config: OctopusConfig, size: f64, seed: u64) -> Result<Self, RigError> {
        Self::new(config, size, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> Rig<R> {
    /// Builds the creature with limb geometry drawn from `rng`, scaled so
    /// that it spans `size` pixels.
    pub fn new(config: OctopusConfig, size: f64, mut rng: R) -> Result<Self, RigError> {
        let octopus = Octopus::new(config, &mut rng);
        let mut rig = Self {
            octopus,
            transform: Transform2D::default(),
            drift: None,
            rng,
            min_step: 0.0,
        };
        rig.set_size(size)?;
        Ok(rig)
    }

    pub fn octopus(&self) -> &Octopus {
        &self.octopus
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Rescales the whole rig to `size` pixels and retunes the stroke step.
    pub fn set_size(&mut self, size: f64) -> Result<(), RigError> {
        self.transform.set_size(size)?;
        let step_px = if self.octopus.config().particle_legs {
            PARTICLE_STEP_PX
        } else {
            TENTACLE_STEP_PX
        };
        self.min_step = step_px * BASE_SCALE / size;
        Ok(())
    }

    /// Minimum stroke sampling step in logical units.
    pub fn stroke_min_step(&self) -> f64 {
        self.min_step
    }

    /// Recentres on a new viewport of `width` x `height` pixels.
    pub fn on_bounds_change(&mut self, width: f64, height: f64) {
        log::debug!("bounds changed to {width}x{height}");
        self.octopus.on_resize(&self.transform, width, height);
    }

    /// Moves the body to a pixel position.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.octopus.move_to(&self.transform, DVec2::new(x, y));
    }

    /// True if the pixel position touches the body.
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        self.octopus.hit_test(&self.transform, DVec2::new(x, y))
    }

    pub fn set_blinking(&mut self, blinking: bool) {
        self.octopus.set_blinking(blinking);
    }

    /// Starts wandering; a no-op while already drifting.
    pub fn start_drift(&mut self) {
        if self.drift.is_none() {
            log::debug!("drift started");
            self.drift = Some(DriftSession {
                controller: DriftController::new(),
                origin_ms: None,
            });
        }
    }

    /// Stops wandering and forgets the drift state; a no-op when stopped.
    pub fn stop_drift(&mut self) {
        if self.drift.take().is_some() {
            log::debug!("drift stopped");
        }
    }

    pub fn is_drifting(&self) -> bool {
        self.drift.is_some()
    }

    pub fn drift(&self) -> Option<&DriftController> {
        self.drift.as_ref().map(|s| &s.controller)
    }

    /// One ticker callback: drift (if running), then one spring step for
    /// every joint. Returns the drift report when drifting.
    pub fn on_frame(&mut self, elapsed_ms: u64, delta_ms: u64) -> Option<DriftStep> {
        let step = self.drift.as_mut().map(|session| {
            let origin = *session.origin_ms.get_or_insert(elapsed_ms);
            session.controller.tick(
                elapsed_ms.saturating_sub(origin),
                delta_ms,
                &mut self.octopus,
                &mut self.rng,
            )
        });
        self.octopus.advance(delta_ms as f64 / 1000.0);
        step
    }

    /// Reports and clears a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.octopus.take_redraw()
    }

    /// Renders the current pose onto `surface` in device pixels.
    pub fn draw(&self, surface: &mut dyn Surface, stroke: &mut dyn TaperedStroke) {
        stroke.set_min_step(self.min_step);
        stroke.set_dotted(self.octopus.config().particle_legs);
        surface.set_transform(self.transform.forward());
        self.octopus.render(surface, stroke);
    }
}
