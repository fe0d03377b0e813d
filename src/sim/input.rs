//! Held-key state polled by the simulation
//!
//! Raw key events from the host mutate this through [`InputState::set`]; the
//! step function only reads it. Press/release events are idempotent, so a
//! repeated "press" while already pressed changes nothing.

use serde::{Deserialize, Serialize};

/// Logical controls the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Fire,
}

/// Current pressed/held state of the three controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// Record a press (`true`) or release (`false`) of a control
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Fire => self.fire = pressed,
        }
    }

    /// Release everything (used when the host loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
