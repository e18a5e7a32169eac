//! Per-frame work.
//!
//! The loop owns no wall state. Each tick advances the orbit controls and
//! redraws whatever the session currently holds; recomposition happens in
//! the selection handlers, never here.

use buildup_raycast::OrbitControls;

use crate::render::RenderAdapter;
use crate::session::RenderSession;

/// Drives camera controls and drawing once per display frame.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    controls: OrbitControls,
    frames: u64,
}

impl RenderLoop {
    /// Loop using `controls`.
    pub fn new(controls: OrbitControls) -> Self {
        Self {
            controls,
            frames: 0,
        }
    }

    /// Run one frame: update the controls, then draw.
    pub fn tick<A: RenderAdapter>(&mut self, session: &mut RenderSession<A>) {
        self.controls.update(session.camera_mut());
        session.draw();
        self.frames += 1;
    }

    /// Run `count` frames.
    pub fn run<A: RenderAdapter>(&mut self, session: &mut RenderSession<A>, count: u64) {
        for _ in 0..count {
            self.tick(session);
        }
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The orbit controls, to queue rotation or dolly.
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// The orbit controls.
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }
}
