//! Starfall - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `session`: Session state machine and the hooks the presentation layer plugs into
//! - `tuning`: Data-driven game balance
//!
//! Rendering, HUD text, and menu wiring live outside this crate; they consume
//! read-only snapshots through the callbacks on [`Session`].

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{HudUpdate, Session, Snapshot, StartOutcome};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in logical pixels (y grows downward, origin top-left)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Vertical offset of the player ship center from the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

    /// Nominal frame interval of the host clock (ms); steps accept any dt
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}
