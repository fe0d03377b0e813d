//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock dt is an input, never sampled
//! - Stable iteration order (insertion order, removals back-to-front)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod step;

pub use collision::{Aabb, overlaps};
pub use input::{Control, InputState};
pub use state::{Enemy, GamePhase, GameState, Player, Shot, GAME_OVER_MESSAGE};
pub use step::{GameEvent, step};
