//! Closed-form damped spring for a single scalar.
//!
//! Each joint axis is a unit mass on a spring pulling toward a movable rest
//! position. Steps use the analytic solution of the damped harmonic
//! oscillator, so any frame delta is stable regardless of stiffness.

/// Stiffness of the base joint of every limb.
pub const STIFFNESS_LOW: f64 = 200.0;
/// Stiffness of the middle joint.
pub const STIFFNESS_VERY_LOW: f64 = 50.0;
/// Stiffness of the tip joint.
pub const STIFFNESS_TIP: f64 = STIFFNESS_VERY_LOW / 2.0;
/// Damping ratio shared by every joint: visibly bouncy but settles quickly.
pub const DAMPING_RATIO_LOW_BOUNCY: f64 = 0.75;

/// Smallest displacement considered visible, in logical units.
const MIN_VISIBLE_CHANGE: f64 = 1.0;
const VALUE_THRESHOLD: f64 = MIN_VISIBLE_CHANGE * 0.75;
const VELOCITY_THRESHOLD: f64 = VALUE_THRESHOLD * 62.5;

/// Per-joint stiffness tier, base stiffest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StiffnessTier {
    Base,
    Middle,
    Tip,
}

impl StiffnessTier {
    /// Tier for joint `index` of a limb; anything past the middle is a tip.
    pub fn for_joint(index: usize) -> Self {
        match index {
            0 => StiffnessTier::Base,
            1 => StiffnessTier::Middle,
            _ => StiffnessTier::Tip,
        }
    }

    pub fn stiffness(self) -> f64 {
        match self {
            StiffnessTier::Base => STIFFNESS_LOW,
            StiffnessTier::Middle => STIFFNESS_VERY_LOW,
            StiffnessTier::Tip => STIFFNESS_TIP,
        }
    }
}

/// Precomputed damped-spring step for one frame delta.
///
/// Maps displacement and velocity over `dt` with four coefficients, following
/// Ryan Juckett's closed form: `x' = pp*x + pv*v`, `v' = vp*x + vv*v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pos_pos: f64,
    pos_vel: f64,
    vel_pos: f64,
    vel_vel: f64,
}

impl Spring {
    /// Coefficients for a step of `dt` seconds at angular frequency `omega`
    /// (`sqrt(stiffness)` for a unit mass) and damping ratio `zeta`.
    pub fn new(dt: f64, omega: f64, zeta: f64) -> Self {
        let zeta = zeta.max(0.0);
        if omega <= 0.0 {
            return Self {
                pos_pos: 1.0,
                pos_vel: 0.0,
                vel_pos: 0.0,
                vel_vel: 1.0,
            };
        }

        if zeta > 1.0 {
            let za = -omega * zeta;
            let zb = omega * (zeta * zeta - 1.0).sqrt();
            let (z1, z2) = (za - zb, za + zb);
            let e1 = (z1 * dt).exp();
            let e2 = (z2 * dt).exp();
            let inv_two_zb = 1.0 / (2.0 * zb);
            let e1_over = e1 * inv_two_zb;
            let e2_over = e2 * inv_two_zb;
            let z1e1_over = z1 * e1_over;
            let z2e2_over = z2 * e2_over;
            Self {
                pos_pos: e1_over * z2 - z2e2_over + e2,
                pos_vel: -e1_over + e2_over,
                vel_pos: (z1e1_over - z2e2_over + e2) * z2,
                vel_vel: -z1e1_over + z2e2_over,
            }
        } else if zeta == 1.0 {
            let exp_term = (-omega * dt).exp();
            let time_exp = dt * exp_term;
            let time_exp_freq = time_exp * omega;
            Self {
                pos_pos: time_exp_freq + exp_term,
                pos_vel: time_exp,
                vel_pos: -omega * time_exp_freq,
                vel_vel: -time_exp_freq + exp_term,
            }
        } else {
            let omega_zeta = omega * zeta;
            let alpha = omega * (1.0 - zeta * zeta).sqrt();
            let exp_term = (-omega_zeta * dt).exp();
            let (sin, cos) = (alpha * dt).sin_cos();
            let exp_sin = exp_term * sin;
            let exp_cos = exp_term * cos;
            let exp_omega_zeta_sin_over_alpha = exp_term * omega_zeta * sin / alpha;
            Self {
                pos_pos: exp_cos + exp_omega_zeta_sin_over_alpha,
                pos_vel: exp_sin / alpha,
                vel_pos: -exp_sin * alpha - omega_zeta * exp_omega_zeta_sin_over_alpha,
                vel_vel: exp_cos - exp_omega_zeta_sin_over_alpha,
            }
        }
    }

    /// New `(position, velocity)` after one step toward `target`.
    pub fn update(&self, pos: f64, vel: f64, target: f64) -> (f64, f64) {
        let x = pos - target;
        (
            x * self.pos_pos + vel * self.pos_vel + target,
            x * self.vel_pos + vel * self.vel_vel,
        )
    }
}

/// One scalar spring simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringAxis {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping_ratio: f64,
    running: bool,
    /// Coefficients for the last frame delta seen.
    cached: Option<(f64, Spring)>,
}

impl SpringAxis {
    /// A spring resting at `value`.
    pub fn new(value: f64, stiffness: f64, damping_ratio: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping_ratio,
            running: false,
            cached: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Moves the rest position; the value follows on later steps.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
        if self.value != target || self.velocity != 0.0 {
            self.running = true;
        }
    }

    /// Places the value at `value`, stops motion and rests there.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.running = false;
    }

    /// Advances by `dt` seconds. Returns true if the value changed.
    pub fn step(&mut self, dt: f64) -> bool {
        if !self.running || dt <= 0.0 {
            return false;
        }
        let spring = self.spring_for(dt);
        let before = self.value;
        let (value, velocity) = spring.update(self.value, self.velocity, self.target);
        self.value = value;
        self.velocity = velocity;
        if self.velocity.abs() < VELOCITY_THRESHOLD
            && (self.value - self.target).abs() < VALUE_THRESHOLD
        {
            self.value = self.target;
            self.velocity = 0.0;
            self.running = false;
        }
        self.value != before
    }

    fn spring_for(&mut self, dt: f64) -> Spring {
        match self.cached {
            Some((cached_dt, spring)) if cached_dt == dt => spring,
            _ => {
                let spring = Spring::new(dt, self.stiffness.sqrt(), self.damping_ratio);
                self.cached = Some((dt, spring));
                spring
            }
        }
    }
}
