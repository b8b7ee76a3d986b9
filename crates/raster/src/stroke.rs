//! Tapered limbs drawn as a joined ribbon or as a trail of dots.

use crate::geometry::{to_path, ArcSampler};
use glam::DVec2;
use ocquarium_core::{Path, Srgb, Surface, TaperedStroke};

/// Samples a path evenly by arc length, never closer than the minimum step,
/// with the width interpolated linearly from the start width to the end
/// width.
///
/// Joined ribbons stroke each pair of neighbouring samples with round caps so
/// the tentacle stays continuous however thin it gets. Dotted ribbons fill a
/// circle at each sample and leave the gaps open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonStroke {
    min_step: f64,
    dotted: bool,
}

impl Default for RibbonStroke {
    fn default() -> Self {
        Self {
            min_step: 1.0,
            dotted: false,
        }
    }
}

impl RibbonStroke {
    pub fn new(min_step: f64) -> Self {
        let mut stroke = Self::default();
        stroke.set_min_step(min_step);
        stroke
    }

    /// Number of intervals between samples for a path of `length`.
    pub fn intervals(&self, length: f64) -> usize {
        ((length / self.min_step).floor() as usize).max(1)
    }
}

impl TaperedStroke for RibbonStroke {
    fn set_min_step(&mut self, step: f64) {
        if step.is_finite() && step > 0.0 {
            self.min_step = step;
        } else {
            log::warn!("ignoring invalid stroke step {step}");
        }
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
        let Some(path) = to_path(path) else {
            return;
        };
        let arc = ArcSampler::new(&path);
        let length = arc.length();
        let n = self.intervals(length);
        let samples: Vec<(DVec2, f64)> = (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                let width = start_width + (end_width - start_width) * t;
                (arc.point_at(length * t), width)
            })
            .collect();

        if self.dotted {
            for &(p, width) in &samples {
                surface.fill_circle(p, width / 2.0, color);
            }
            return;
        }
        for pair in samples.windows(2) {
            let ((a, wa), (b, wb)) = (pair[0], pair[1]);
            if a == b {
                surface.fill_circle(a, wa.max(wb) / 2.0, color);
            } else {
                surface.stroke_segments(&[(a, b)], (wa + wb) / 2.0, color, None);
            }
        }
    }
}
