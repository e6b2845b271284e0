//! Device-agnostic input signals
//!
//! Every device (mouse, touch, keyboard) collapses into two signals:
//! `held`, which is level-triggered, and `jump_edge`, which is armed on each
//! press and stays armed until a mode consumes it or the action is released.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSignals {
    /// Primary action is engaged
    pub held: bool,
    /// A press that hasn't been consumed yet
    pub jump_edge: bool,
}

impl InputSignals {
    /// Action pressed: hold and arm a fresh edge
    pub fn press(&mut self) {
        self.held = true;
        self.jump_edge = true;
    }

    /// Action released: clears both signals
    pub fn release(&mut self) {
        self.held = false;
        self.jump_edge = false;
    }

    /// Consume the pending edge, if any
    pub fn take_jump_edge(&mut self) -> bool {
        std::mem::take(&mut self.jump_edge)
    }
}
