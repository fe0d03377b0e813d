//! Per-frame simulation step
//!
//! Advances the world by one frame given the elapsed wall-clock time since
//! the previous step. The phase order is load-bearing: movement, fire,
//! cooldown decay, shot advance, spawning, enemy advance + player contact,
//! then shot/enemy collisions. Removals walk collections back-to-front so
//! index shifts never skip or double-process an entity.

use rand::Rng;

use super::collision::overlaps;
use super::input::InputState;
use super::state::{Enemy, GAME_OVER_MESSAGE, GamePhase, GameState, Shot};
use crate::consts::*;
use crate::tuning::Tuning;

/// What happened during a step, for HUD updates and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemySpawned { x: f32, speed: f32 },
    EnemyDestroyed { score: u64 },
    PlayerHit { lives_left: u8 },
    GameOver { score: u64 },
}

/// Advance the game by one frame.
///
/// `dt_ms` is wall-clock time since the last step and only drives the spawn
/// timer; movement and the fire cooldown are per-step quantities, matching
/// the host clock's frame cadence. A step outside [`GamePhase::Running`] is
/// a no-op, so calling this after game over is safe and changes nothing.
pub fn step(
    state: &mut GameState,
    input: &InputState,
    dt_ms: f32,
    tuning: &Tuning,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    // Player movement. Opposite holds cancel out; clamp keeps the ship fully
    // inside the playfield.
    if input.left {
        state.player.pos.x -= state.player.speed;
    }
    if input.right {
        state.player.pos.x += state.player.speed;
    }
    let half_w = state.player.size.x * 0.5;
    state.player.pos.x = state.player.pos.x.clamp(half_w, PLAYFIELD_WIDTH - half_w);

    // Fire, throttled per step rather than per millisecond: holding fire
    // yields one shot every `fire_cooldown_steps` steps.
    if input.fire && state.player.cooldown == 0 {
        state.shots.push(Shot {
            pos: state.player.muzzle(),
            size: tuning.shot_size,
            speed: tuning.shot_speed,
        });
        state.player.cooldown = tuning.fire_cooldown_steps;
        events.push(GameEvent::ShotFired);
    }

    // Cooldown decay, including the frame that just set it.
    if state.player.cooldown > 0 {
        state.player.cooldown -= 1;
    }

    // Advance shots; drop those whose bottom edge crossed above the top.
    for shot in &mut state.shots {
        shot.pos.y -= shot.speed;
    }
    state.shots.retain(|s| s.aabb().bottom() >= 0.0);

    // Spawn timer. At most one enemy per step, however large dt was.
    state.spawn_timer_ms -= dt_ms;
    if state.spawn_timer_ms <= 0.0 {
        let enemy = spawn_enemy(state, tuning);
        events.push(GameEvent::EnemySpawned {
            x: enemy.pos.x,
            speed: enemy.speed,
        });
        state.enemies.push(enemy);
        state.spawn_timer_ms = tuning.spawn_interval_ms(state.score);
    }

    // Advance enemies. Contact with the player consumes the enemy and costs
    // a life; an enemy removed here never reaches the shot pass below. The
    // player box is re-read per enemy because a hit recenters the ship
    // mid-pass.
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        state.enemies[i].pos.y += state.enemies[i].speed;

        if overlaps(&state.enemies[i].aabb(), &state.player.aabb()) {
            state.enemies.remove(i);
            on_player_hit(state, &mut events);
            continue;
        }

        // Fully past the bottom edge
        if state.enemies[i].aabb().top() > PLAYFIELD_HEIGHT {
            state.enemies.remove(i);
        }
    }

    // Shot/enemy collisions. Each enemy takes at most one shot per step;
    // both disappear on the first match.
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy_box = state.enemies[i].aabb();
        let mut j = state.shots.len();
        while j > 0 {
            j -= 1;
            if overlaps(&state.shots[j].aabb(), &enemy_box) {
                state.enemies.remove(i);
                state.shots.remove(j);
                state.score += tuning.score_per_kill;
                events.push(GameEvent::EnemyDestroyed { score: state.score });
                break;
            }
        }
    }

    events
}

/// Sample a new enemy just above the top edge, never overhanging the sides
fn spawn_enemy(state: &mut GameState, tuning: &Tuning) -> Enemy {
    let half_w = tuning.enemy_size.x * 0.5;
    let x = state.rng.random_range(half_w..PLAYFIELD_WIDTH - half_w);
    let speed = state
        .rng
        .random_range(tuning.enemy_speed_min..tuning.enemy_speed_max);
    Enemy {
        pos: glam::Vec2::new(x, -tuning.enemy_size.y),
        size: tuning.enemy_size,
        speed,
    }
}

/// Lose a life; at zero the run ends, otherwise only the ship's x recenters.
///
/// No invulnerability window and the vertical position never moves.
fn on_player_hit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.message = Some(GAME_OVER_MESSAGE);
        events.push(GameEvent::GameOver { score: state.score });
    } else {
        state.player.pos.x = PLAYFIELD_WIDTH / 2.0;
    }
}
