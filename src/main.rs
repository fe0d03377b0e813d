//! Starfall entry point
//!
//! Headless demo: drives a seeded session with a small autopilot and prints
//! the final score. Useful for balance passes and for watching the event
//! stream (`RUST_LOG=debug`).

use std::env;
use std::error::Error;
use std::fs;

use starfall::consts::FRAME_MS;
use starfall::sim::Control;
use starfall::{Session, StartOutcome, Tuning};

/// Demo runs end after this many frames even if the autopilot survives
const MAX_DEMO_FRAMES: u64 = 20_000;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut seed: u64 = 0xC0FFEE;
    let mut tuning = Tuning::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                seed = value.parse()?;
            }
            "--tuning" => {
                let path = args.next().ok_or("--tuning needs a path")?;
                tuning = Tuning::from_json(&fs::read_to_string(&path)?)?;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    let mut session = Session::with_tuning(seed, true, tuning);
    session.set_hud_hook(|hud| log::info!("hud: lives={} score={}", hud.lives, hud.score));

    match session.start(false) {
        StartOutcome::Started { .. } => {}
        StartOutcome::Locked => return Err("demo session was locked".into()),
    }

    let mut frames = 0u64;
    while frames < MAX_DEMO_FRAMES && session.step(FRAME_MS) {
        frames += 1;
        autopilot(&mut session);
    }

    println!(
        "seed {seed}: survived {frames} frames, score {}, lives {}",
        session.score(),
        session.lives()
    );
    Ok(())
}

/// Hold fire and chase the lowest enemy: line up under it while it is far,
/// sidestep once it gets close to the ship's row.
fn autopilot(session: &mut Session) {
    let player_x = session.player().pos.x;
    let danger_line = session.player().pos.y - 120.0;
    let threat = session
        .enemies()
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .cloned();

    let (left, right) = match threat {
        Some(enemy) if enemy.pos.y > danger_line => {
            if enemy.pos.x <= player_x {
                (false, true)
            } else {
                (true, false)
            }
        }
        Some(enemy) if enemy.pos.x < player_x - 4.0 => (true, false),
        Some(enemy) if enemy.pos.x > player_x + 4.0 => (false, true),
        _ => (false, false),
    };

    session.on_input(Control::Fire, true);
    session.on_input(Control::Left, left);
    session.on_input(Control::Right, right);
}
