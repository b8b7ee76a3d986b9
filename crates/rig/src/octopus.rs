//! The creature: eight limbs around a body anchor.
//!
//! Geometry lives in logical space. Limb bases sit on a short horizontal line
//! just under the body centre, fanned by each limb's bias. Half the limbs are
//! drawn behind the body and half in front of it for depth.

use glam::DVec2;
use ocquarium_core::{OctopusConfig, RandomSource, Rect, Srgb, Surface, TaperedStroke};

use crate::arm::{ArmChain, JOINTS};
use crate::transform::Transform2D;

/// Limbs per creature.
pub const ARM_COUNT: usize = 8;
/// Limbs drawn behind the body.
pub const BACK_ARMS: [usize; 4] = [1, 3, 4, 6];
/// Limbs drawn over the body.
pub const FRONT_ARMS: [usize; 4] = [0, 2, 5, 7];

const ARM_MAX_WIDTH: f64 = 14.0;
const ARM_MIN_WIDTH: f64 = 2.0;
/// Horizontal spread of limb bases across the full bias range.
const ARM_BASE_SPREAD: f64 = 30.0;
/// Vertical drop of limb bases below the anchor.
const ARM_BASE_DROP: f64 = 26.0;

const BODY_COLOR: Srgb = Srgb::from_rgb8(0x10, 0x10, 0x10);
const ARM_COLOR: Srgb = Srgb::from_rgb8(0x10, 0x10, 0x10);
const ARM_COLOR_BACK: Srgb = Srgb::from_rgb8(0x00, 0x00, 0x00);
const EYE_COLOR: Srgb = Srgb::from_rgb8(0x80, 0x80, 0x80);
const PUPIL_COLOR: Srgb = Srgb::from_rgb8(0x00, 0x00, 0x00);

const HEAD_RADIUS: f64 = 36.0;
const BODY_HALF_WIDTH: f64 = 40.0;
const BODY_TOP: f64 = -60.0;
const BODY_BOTTOM: f64 = 40.0;
const MOUTH_HALF_WIDTH: f64 = 61.0;
const MOUTH_TOP: f64 = 8.0;
const MOUTH_BOTTOM: f64 = 12.0;
const EYE_OFFSET: DVec2 = DVec2::new(16.0, -12.0);
const EYE_RADIUS: f64 = 6.0;
const PUPIL_SIZE: f64 = 5.0;

/// Spread factor of limb `i`, evenly spaced over -0.5..=0.5.
pub fn arm_bias(i: usize) -> f64 {
    i as f64 / (ARM_COUNT - 1) as f64 - 0.5
}

/// Random joint offsets for a limb with the given bias.
fn random_offsets(bias: f64, rng: &mut impl RandomSource) -> [DVec2; JOINTS] {
    let dx1 = 10.0 * bias + rng.next_range(0.0, 20.0);
    let dy1 = rng.next_range(20.0, 50.0);
    let dx2 = 40.0 * bias + rng.next_range(-60.0, 60.0);
    let dy2 = rng.next_range(30.0, 80.0);
    let dx3 = rng.next_range(-40.0, 40.0);
    let dy3 = rng.next_range(-80.0, 40.0);
    [
        DVec2::new(dx1, dy1),
        DVec2::new(dx2, dy2),
        DVec2::new(dx3, dy3),
    ]
}

/// Eye drawn as a rounded bar; `open` bars are thicker.
fn draw_pupil(surface: &mut dyn Surface, center: DVec2, size: f64, open: bool, color: Srgb) {
    let r = if open { size * 0.33 } else { size * 0.1 };
    surface.fill_round_rect(Rect::from_center_half(center, DVec2::new(size, r)), r, color);
}

/// Body anchor, limbs, blink state and the logical clamp box.
#[derive(Debug, Clone)]
pub struct Octopus {
    arms: [ArmChain; ARM_COUNT],
    anchor: DVec2,
    bounds: DVec2,
    blinking: bool,
    config: OctopusConfig,
    redraw: bool,
}

impl Octopus {
    /// Builds eight limbs fanned left to right with randomized droop.
    ///
    /// Limbs start at the origin; the first resize or move places them.
    pub fn new(config: OctopusConfig, rng: &mut impl RandomSource) -> Self {
        let arms = std::array::from_fn(|i| {
            ArmChain::new(
                DVec2::ZERO,
                random_offsets(arm_bias(i), rng),
                ARM_MAX_WIDTH,
                ARM_MIN_WIDTH,
            )
        });
        Self {
            arms,
            anchor: DVec2::ZERO,
            bounds: DVec2::ZERO,
            blinking: false,
            config,
            redraw: true,
        }
    }

    pub fn config(&self) -> &OctopusConfig {
        &self.config
    }

    pub fn arms(&self) -> &[ArmChain; ARM_COUNT] {
        &self.arms
    }

    /// Body position in logical space.
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Logical extent of the viewport, for clamping drift.
    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Locks (rigid) or frees every limb.
    pub fn set_locked(&mut self, rigid: bool) {
        for arm in &mut self.arms {
            arm.set_locked(rigid);
        }
    }

    /// Recentres on a new viewport without spring flailing and recomputes the
    /// logical clamp box.
    pub fn on_resize(&mut self, transform: &Transform2D, width: f64, height: f64) {
        self.set_locked(true);
        self.move_to(transform, DVec2::new(width / 2.0, height / 2.0));
        self.set_locked(false);
        self.bounds = transform.to_logical(DVec2::new(width, height));
    }

    /// Moves the body to a pixel position, honoring the current lock state.
    pub fn move_to(&mut self, transform: &Transform2D, pixel: DVec2) {
        self.anchor = transform.to_logical(pixel);
        self.reposition_arms();
    }

    /// Sets the anchor in logical space without touching the limbs.
    pub fn set_anchor_logical(&mut self, anchor: DVec2) {
        self.anchor = anchor;
    }

    /// Places every limb base relative to the anchor.
    pub fn reposition_arms(&mut self) {
        for (i, arm) in self.arms.iter_mut().enumerate() {
            let base = self.anchor + DVec2::new(arm_bias(i) * ARM_BASE_SPREAD, ARM_BASE_DROP);
            arm.set_anchor(base);
        }
        self.redraw = true;
    }

    pub fn hit_test(&self, transform: &Transform2D, pixel: DVec2) -> bool {
        transform.hit_test(pixel, self.anchor)
    }

    pub fn set_blinking(&mut self, blinking: bool) {
        self.blinking = blinking;
        self.redraw = true;
    }

    /// Advances every joint spring by `dt` seconds. Returns true if any moved.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut moved = false;
        for arm in &mut self.arms {
            moved |= arm.advance(dt);
        }
        self.redraw |= moved;
        moved
    }

    /// Reports and clears a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Paints back limbs, body, eyes, front limbs and the optional debug
    /// overlay, in logical coordinates.
    pub fn render(&self, surface: &mut dyn Surface, stroke: &dyn TaperedStroke) {
        let p = self.anchor;

        for i in BACK_ARMS {
            self.arms[i].render(surface, stroke, ARM_COLOR_BACK);
        }

        surface.fill_circle(p, HEAD_RADIUS, EYE_COLOR);
        surface.push_clip_out(Rect::from_ltrb(
            p.x - MOUTH_HALF_WIDTH,
            p.y + MOUTH_TOP,
            p.x + MOUTH_HALF_WIDTH,
            p.y + MOUTH_BOTTOM,
        ));
        surface.fill_oval(
            Rect::from_ltrb(
                p.x - BODY_HALF_WIDTH,
                p.y + BODY_TOP,
                p.x + BODY_HALF_WIDTH,
                p.y + BODY_BOTTOM,
            ),
            BODY_COLOR,
        );
        surface.pop_clip();

        let eyes = [
            p + DVec2::new(-EYE_OFFSET.x, EYE_OFFSET.y),
            p + EYE_OFFSET,
        ];
        for eye in eyes {
            if self.blinking {
                draw_pupil(surface, eye, EYE_RADIUS, false, EYE_COLOR);
            } else {
                surface.fill_circle(eye, EYE_RADIUS, EYE_COLOR);
            }
        }
        if self.config.weird_eyes {
            for eye in eyes {
                draw_pupil(surface, eye, PUPIL_SIZE, true, PUPIL_COLOR);
            }
        }

        for i in FRONT_ARMS {
            self.arms[i].render(surface, stroke, ARM_COLOR);
        }

        if self.config.debug_paths {
            for arm in &self.arms {
                arm.render_debug(surface);
            }
        }
    }
}
