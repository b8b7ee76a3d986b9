//! Quadratic spline paths.
//!
//! Limbs are described as a move-to followed by quadratic segments in logical
//! space. Rasterizing and measuring them is left to the surface.

use glam::DVec2;

/// One quadratic Bezier segment continuing from the previous endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub ctrl: DVec2,
    pub to: DVec2,
}

/// A move-to followed by zero or more quadratic segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: DVec2,
    quads: Vec<Quad>,
}

impl Path {
    /// Starts a path at `start`.
    pub fn move_to(start: DVec2) -> Self {
        Self {
            start,
            quads: Vec::new(),
        }
    }

    /// Appends a quadratic segment through `ctrl` ending at `to`.
    pub fn quad_to(mut self, ctrl: DVec2, to: DVec2) -> Self {
        self.quads.push(Quad { ctrl, to });
        self
    }

    pub fn start(&self) -> DVec2 {
        self.start
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Final point of the path.
    pub fn end(&self) -> DVec2 {
        self.quads.last().map_or(self.start, |q| q.to)
    }
}
