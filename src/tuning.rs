//! Data-driven game balance
//!
//! Every number the simulation tunes itself with lives here, so balance
//! passes are a JSON edit, not a rebuild. Defaults match the shipped game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub starting_lives: u8,
    /// Score awarded per enemy destroyed
    pub score_per_kill: u64,

    pub player_size: Vec2,
    /// Horizontal ship speed, px per step
    pub player_speed: f32,
    /// Steps between shots while fire is held
    pub fire_cooldown_steps: u32,

    pub shot_size: Vec2,
    /// Upward shot speed, px per step
    pub shot_speed: f32,

    pub enemy_size: Vec2,
    /// Downward enemy speed range, px per step, sampled uniformly per spawn
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,

    /// Spawn interval at score 0, ms
    pub spawn_base_ms: f32,
    /// Spawn interval never drops below this, ms
    pub spawn_floor_ms: f32,
    /// Interval shrink per score point, ms
    pub spawn_scale_ms_per_point: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            score_per_kill: 10,

            player_size: Vec2::new(40.0, 40.0),
            player_speed: 5.0,
            fire_cooldown_steps: 12,

            shot_size: Vec2::new(4.0, 10.0),
            shot_speed: 8.0,

            enemy_size: Vec2::new(32.0, 32.0),
            enemy_speed_min: 1.5,
            enemy_speed_max: 3.0,

            spawn_base_ms: 1000.0,
            spawn_floor_ms: 300.0,
            spawn_scale_ms_per_point: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Spawn interval for the given score: shrinks linearly, clamped to the floor
    pub fn spawn_interval_ms(&self, score: u64) -> f32 {
        (self.spawn_base_ms - self.spawn_scale_ms_per_point * score as f32)
            .max(self.spawn_floor_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_interval_shrinks_with_score_down_to_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_interval_ms(0), 1000.0);
        assert_eq!(tuning.spawn_interval_ms(100), 800.0);
        assert_eq!(tuning.spawn_interval_ms(350), 300.0);
        assert_eq!(tuning.spawn_interval_ms(100_000), 300.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"spawn_floor_ms": 150.0}"#).unwrap();
        assert_eq!(tuning.spawn_floor_ms, 150.0);
        assert_eq!(tuning.spawn_base_ms, 1000.0);
        assert_eq!(tuning.fire_cooldown_steps, 12);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
