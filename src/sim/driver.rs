//! Fixed-step loop driver
//!
//! Converts wall-clock frame timestamps into whole simulation steps. A long
//! stall (background tab, debugger) is clamped to `MAX_FRAME_DT` so it can't
//! trigger a runaway catch-up.

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Steps to run for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSteps {
    /// Whole fixed steps to simulate, in order
    pub steps: u32,
    /// Clamped elapsed time for this frame (seconds)
    pub dt: f32,
}

#[derive(Debug, Clone, Default)]
pub struct LoopDriver {
    accumulator: f32,
    /// Previous frame timestamp in milliseconds
    last_time: Option<f64>,
}

impl LoopDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget timing history; the next frame only seeds the clock
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Account for a frame at `now_ms` and report how many steps are due
    pub fn advance(&mut self, now_ms: f64) -> FrameSteps {
        let elapsed = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);

        let dt = elapsed.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        FrameSteps { steps, dt }
    }

    /// Leftover time not yet consumed by a step (seconds)
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}
