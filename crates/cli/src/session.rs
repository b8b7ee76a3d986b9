//! Headless replay of a [`Scene`]: simulate the drift, then paint the last
//! frame.

use ocquarium_core::{RigError, Scene, Srgb};
use ocquarium_raster::{Pixmap, RibbonStroke};
use ocquarium_rig::Rig;
use serde_json::{json, Value};

/// What happened during a replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub frames: u64,
    pub jumps: u32,
    pub blinks: u32,
    pub anchor: (f64, f64),
}

impl Summary {
    pub fn to_json(&self) -> Value {
        json!({
            "frames": self.frames,
            "jumps": self.jumps,
            "blinks": self.blinks,
            "anchor": [self.anchor.0, self.anchor.1],
        })
    }
}

/// Runs the scene's frames. A zero duration leaves the creature centred and
/// settles nothing.
pub fn simulate(scene: &Scene) -> Result<(Rig, Summary), RigError> {
    scene.validate()?;
    let mut rig = Rig::with_seed(scene.config, scene.size, scene.seed)?;
    rig.on_bounds_change(scene.width as f64, scene.height as f64);

    let frames = scene.frame_count();
    let mut jumps = 0;
    let mut blinks = 0;
    if frames > 0 {
        rig.start_drift();
    }
    for frame in 1..=frames {
        if let Some(step) = rig.on_frame(frame * scene.frame_ms, scene.frame_ms) {
            jumps += u32::from(step.jumped);
            blinks += u32::from(step.blink == Some(true));
        }
    }
    rig.stop_drift();

    let anchor = rig.octopus().anchor();
    log::debug!("simulated {frames} frames: {jumps} jumps, {blinks} blinks");
    Ok((
        rig,
        Summary {
            frames,
            jumps,
            blinks,
            anchor: (anchor.x, anchor.y),
        },
    ))
}

/// Simulates the scene and paints its final frame over `background`.
pub fn render(scene: &Scene, background: Srgb) -> Result<(Pixmap, Summary), RigError> {
    let (rig, summary) = simulate(scene)?;
    let mut pixmap = Pixmap::new(scene.width, scene.height, background)?;
    rig.draw(&mut pixmap, &mut RibbonStroke::default());
    Ok((pixmap, summary))
}
