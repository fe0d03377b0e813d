//! Game state and core simulation types
//!
//! One [`GameState`] owns every entity collection and session counter; a
//! single [`GameState::reset`] re-initializes all of it atomically, so no
//! entity outlives the session it was spawned in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Message shown when the run ends, cleared on reset
pub const GAME_OVER_MESSAGE: &str = "GAME OVER - press Enter to restart";

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run started yet (menu is up)
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended; only an explicit restart leaves this phase
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed in px per step (not dt-scaled)
    pub speed: f32,
    /// Steps remaining until the next shot is allowed
    pub cooldown: u32,
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Where shots leave the ship: center x, just above the nose
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.size.y * 0.5)
    }
}

/// A player projectile, travelling straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed in px per step
    pub speed: f32,
}

impl Shot {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed in px per step, randomized per spawn
    pub speed: f32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving enemy spawns
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u8,
    /// Only ever increases while a run lasts
    pub score: u64,
    /// Countdown to the next enemy spawn, in ms of elapsed dt
    pub spawn_timer_ms: f32,
    pub player: Player,
    pub shots: Vec<Shot>,
    pub enemies: Vec<Enemy>,
    /// Reserved for enemy fire; always empty for now
    pub enemy_shots: Vec<Shot>,
    /// Demo session for an unauthenticated player
    pub preview: bool,
    /// Terminal message for the presentation layer, if any
    pub message: Option<&'static str>,
}

impl GameState {
    /// Create a fresh state in [`GamePhase::NotStarted`]
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            lives: tuning.starting_lives,
            score: 0,
            spawn_timer_ms: 0.0,
            player: Self::fresh_player(tuning),
            shots: Vec::new(),
            enemies: Vec::new(),
            enemy_shots: Vec::new(),
            preview: false,
            message: None,
        }
    }

    fn fresh_player(tuning: &Tuning) -> Player {
        Player {
            pos: Vec2::new(
                PLAYFIELD_WIDTH / 2.0,
                PLAYFIELD_HEIGHT - PLAYER_BOTTOM_OFFSET,
            ),
            size: tuning.player_size,
            speed: tuning.player_speed,
            cooldown: 0,
        }
    }

    /// Re-initialize everything for a new run and enter [`GamePhase::Running`].
    ///
    /// The spawn timer starts at zero so the first step spawns an enemy
    /// immediately. The RNG keeps running across resets; `preview` is a
    /// property of the session, not the run, and survives too.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.lives = tuning.starting_lives;
        self.score = 0;
        self.spawn_timer_ms = 0.0;
        self.player = Self::fresh_player(tuning);
        self.shots.clear();
        self.enemies.clear();
        self.enemy_shots.clear();
        self.message = None;
        self.phase = GamePhase::Running;
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
