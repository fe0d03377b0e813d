//! Session state machine and presentation hooks
//!
//! A [`Session`] owns one [`GameState`] plus the held-input flags, gates the
//! start of a run behind the login flag, and is the only thing the host loop
//! talks to: key events go in through [`Session::on_input`], the frame clock
//! drives [`Session::step`], and the render/HUD collaborators get read-only
//! data back through callbacks.
//!
//! NotStarted -> Running -> GameOver, with reset returning to Running via a
//! full re-initialization.

use serde::Serialize;

use crate::sim::{
    self, Control, Enemy, GameEvent, GamePhase, GameState, InputState, Player, Shot,
};
use crate::tuning::Tuning;

/// Result of a start request.
///
/// `Locked` is a normal rejected-request outcome, not an error: the caller is
/// unauthenticated and preview was not allowed, and nothing was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartOutcome {
    Started { preview: bool },
    Locked,
}

/// Payload for the HUD collaborator, sent whenever lives or score change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudUpdate {
    pub lives: u8,
    pub score: u64,
}

/// Read-only view of the world handed to the render collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Player,
    pub shots: Vec<Shot>,
    pub enemies: Vec<Enemy>,
    pub lives: u8,
    pub score: u64,
    pub game_over: bool,
    pub preview: bool,
    /// The last start request was refused by the login gate
    pub locked: bool,
    pub message: Option<&'static str>,
}

impl Snapshot {
    fn capture(state: &GameState, locked: bool) -> Self {
        Self {
            player: state.player.clone(),
            shots: state.shots.clone(),
            enemies: state.enemies.clone(),
            lives: state.lives,
            score: state.score,
            game_over: state.game_over(),
            preview: state.preview,
            locked,
            message: state.message,
        }
    }
}

type RenderHook = Box<dyn FnMut(&Snapshot)>;
type HudHook = Box<dyn FnMut(HudUpdate)>;

/// One player session: state machine, input, and collaborator hooks
pub struct Session {
    state: GameState,
    input: InputState,
    tuning: Tuning,
    /// Supplied by the host at construction, immutable for the session
    authenticated: bool,
    /// Set when a start request is refused, cleared by a successful start
    locked: bool,
    on_render: Option<RenderHook>,
    on_hud: Option<HudHook>,
}

impl Session {
    pub fn new(seed: u64, authenticated: bool) -> Self {
        Self::with_tuning(seed, authenticated, Tuning::default())
    }

    pub fn with_tuning(seed: u64, authenticated: bool, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, &tuning),
            input: InputState::default(),
            tuning,
            authenticated,
            locked: false,
            on_render: None,
            on_hud: None,
        }
    }

    /// Called once per completed step with the current snapshot
    pub fn set_render_hook(&mut self, hook: impl FnMut(&Snapshot) + 'static) {
        self.on_render = Some(Box::new(hook));
    }

    /// Called whenever lives or score change
    pub fn set_hud_hook(&mut self, hook: impl FnMut(HudUpdate) + 'static) {
        self.on_hud = Some(Box::new(hook));
    }

    /// Request to start (or restart) a run.
    ///
    /// Unauthenticated callers without preview permission get
    /// [`StartOutcome::Locked`] and nothing changes. Otherwise the run is
    /// fully reset when coming from NotStarted or GameOver, or when the
    /// preview flag differs from the previous run; a running session with an
    /// unchanged preview flag just keeps going. A `Started` outcome tells
    /// the host to (re)start its frame clock.
    pub fn start(&mut self, allow_preview: bool) -> StartOutcome {
        if !self.authenticated && !allow_preview {
            log::info!("start refused: not authenticated and preview not allowed");
            self.locked = true;
            return StartOutcome::Locked;
        }
        self.locked = false;

        let preview = allow_preview && !self.authenticated;
        let restart = self.state.phase != GamePhase::Running || preview != self.state.preview;
        self.state.preview = preview;
        if restart {
            self.reset();
        }
        log::info!("session started (preview: {preview})");
        StartOutcome::Started { preview }
    }

    /// Record a press/release of a logical control
    pub fn on_input(&mut self, control: Control, pressed: bool) {
        self.input.set(control, pressed);
    }

    /// Restart command (the dedicated key); only honored after game over
    pub fn on_restart_requested(&mut self) {
        if self.state.game_over() {
            log::info!("restart requested after game over");
            self.reset();
        }
    }

    /// Release every held control. Hosts call this when the window loses
    /// focus, since the matching key-up events never arrive.
    pub fn on_focus_lost(&mut self) {
        self.input.clear();
    }

    /// Advance one frame and fan out to the collaborators.
    ///
    /// Returns false once the run is over so the host can stop its clock;
    /// calling again anyway is harmless.
    pub fn step(&mut self, dt_ms: f32) -> bool {
        let before = (self.state.lives, self.state.score);
        let events = sim::step(&mut self.state, &self.input, dt_ms, &self.tuning);
        for event in &events {
            match event {
                GameEvent::EnemySpawned { x, speed } => {
                    log::debug!("enemy spawned at x={x:.1} speed={speed:.2}");
                }
                GameEvent::EnemyDestroyed { score } => {
                    log::debug!("enemy destroyed, score now {score}");
                }
                GameEvent::PlayerHit { lives_left } => {
                    log::info!("player hit, {lives_left} lives left");
                }
                GameEvent::GameOver { score } => {
                    log::info!("game over with score {score}");
                }
                GameEvent::ShotFired => {}
            }
        }

        if (self.state.lives, self.state.score) != before {
            self.notify_hud();
        }
        if let Some(hook) = self.on_render.as_mut() {
            hook(&Snapshot::capture(&self.state, self.locked));
        }
        !self.state.game_over()
    }

    /// Full re-initialization of the run; notifies the HUD of the fresh counters
    fn reset(&mut self) {
        self.state.reset(&self.tuning);
        log::info!("run reset (seed {})", self.state.seed);
        self.notify_hud();
    }

    fn notify_hud(&mut self) {
        let update = HudUpdate {
            lives: self.state.lives,
            score: self.state.score,
        };
        if let Some(hook) = self.on_hud.as_mut() {
            hook(update);
        }
    }

    // Read-only accessors for collaborators that poll instead of subscribing.

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.locked)
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over()
    }

    pub fn started(&self) -> bool {
        self.state.phase != GamePhase::NotStarted
    }

    pub fn preview(&self) -> bool {
        self.state.preview
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn message(&self) -> Option<&'static str> {
        self.state.message
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn shots(&self) -> &[Shot] {
        &self.state.shots
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYFIELD_WIDTH;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unauthenticated_start_without_preview_is_locked() {
        // Scenario: locked gate leaves everything untouched
        let mut session = Session::new(1, false);
        let before = session.state.clone();
        assert_eq!(session.start(false), StartOutcome::Locked);
        assert_eq!(session.state, before);
        assert!(!session.started());
        assert!(session.locked());
        assert!(session.snapshot().locked);

        // A later allowed start clears the lock signal
        session.start(true);
        assert!(!session.locked());
    }

    #[test]
    fn unauthenticated_start_with_preview_runs_in_preview_mode() {
        let mut session = Session::new(1, false);
        let outcome = session.start(true);
        assert_eq!(outcome, StartOutcome::Started { preview: true });
        assert!(session.started());
        assert!(session.preview());
        assert_eq!(session.lives(), 3);
    }

    #[test]
    fn authenticated_start_is_never_preview() {
        let mut session = Session::new(1, true);
        // allow_preview is irrelevant once logged in
        assert_eq!(session.start(true), StartOutcome::Started { preview: false });
        assert!(!session.preview());
    }

    #[test]
    fn starting_a_running_session_does_not_reset_it() {
        let mut session = Session::new(1, true);
        session.start(false);
        session.state.score = 70;
        assert_eq!(session.start(false), StartOutcome::Started { preview: false });
        assert_eq!(session.score(), 70);
    }

    #[test]
    fn preview_flag_change_forces_a_reset() {
        let mut session = Session::new(1, true);
        session.start(false);
        session.state.score = 70;
        // Previous run was a preview (e.g. before the player logged in)
        session.state.preview = true;
        session.start(false);
        assert_eq!(session.score(), 0);
        assert!(!session.preview());
    }

    #[test]
    fn start_after_game_over_resets() {
        let mut session = Session::new(1, true);
        session.start(false);
        session.state.score = 120;
        session.state.lives = 0;
        session.state.phase = GamePhase::GameOver;
        session.state.message = Some(sim::GAME_OVER_MESSAGE);

        assert_eq!(session.start(false), StartOutcome::Started { preview: false });
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert!(!session.game_over());
        assert!(session.message().is_none());
    }

    #[test]
    fn focus_loss_releases_held_controls() {
        let mut session = Session::new(3, true);
        session.start(false);
        session.on_input(Control::Right, true);
        session.on_input(Control::Fire, true);

        session.on_focus_lost();
        assert_eq!(session.input, InputState::default());

        let x_before = session.player().pos.x;
        session.step(16.0);
        assert_eq!(session.player().pos.x, x_before);
        assert!(session.shots().is_empty());
    }

    #[test]
    fn restart_command_only_works_after_game_over() {
        let mut session = Session::new(1, true);
        session.start(false);
        session.state.score = 40;

        session.on_restart_requested();
        assert_eq!(session.score(), 40, "ignored while running");

        session.state.lives = 0;
        session.state.phase = GamePhase::GameOver;
        session.on_restart_requested();
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), 3);
        assert!(!session.game_over());
    }

    #[test]
    fn hud_notified_once_for_a_kill() {
        // Scenario: exact shot/enemy overlap, HUD sees one update
        let updates: Rc<RefCell<Vec<HudUpdate>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);

        let mut session = Session::new(3, true);
        session.start(false);
        session.set_hud_hook(move |u| sink.borrow_mut().push(u));
        session.state.spawn_timer_ms = 10_000.0;
        session.state.enemies.push(Enemy {
            pos: Vec2::new(400.0, 300.0),
            size: session.tuning.enemy_size,
            speed: 2.0,
        });
        session.state.shots.push(Shot {
            pos: Vec2::new(400.0, 310.0),
            size: session.tuning.shot_size,
            speed: session.tuning.shot_speed,
        });

        session.step(16.0);
        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0], HudUpdate { lives: 3, score: 10 });
    }

    #[test]
    fn render_hook_sees_every_step() {
        let frames: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);

        let mut session = Session::new(5, true);
        session.start(false);
        session.set_render_hook(move |snap| sink.borrow_mut().push(snap.clone()));

        session.on_input(Control::Right, true);
        for _ in 0..3 {
            assert!(session.step(16.0));
        }

        let frames = frames.borrow();
        assert_eq!(frames.len(), 3);
        // The ship marched right across the frames
        assert!(frames[2].player.pos.x > frames[0].player.pos.x);
        assert_eq!(frames[0].lives, 3);
        assert!(!frames[0].game_over);
    }

    #[test]
    fn step_reports_stopped_after_game_over() {
        let mut session = Session::new(5, true);
        session.start(false);
        session.state.spawn_timer_ms = 10_000.0;
        session.state.lives = 1;
        let player = session.player().clone();
        session.state.enemies.push(Enemy {
            pos: Vec2::new(player.pos.x, player.pos.y - 5.0),
            size: session.tuning.enemy_size,
            speed: 2.0,
        });

        assert!(!session.step(16.0));
        assert!(session.game_over());
        assert_eq!(session.message(), Some(sim::GAME_OVER_MESSAGE));
        // Safe to keep calling; still stopped
        assert!(!session.step(16.0));
    }

    #[test]
    fn snapshot_reflects_the_world() {
        let mut session = Session::new(9, true);
        session.start(false);
        session.step(16.0);
        let snap = session.snapshot();
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.player.pos.x, PLAYFIELD_WIDTH / 2.0);
        assert_eq!(snap.score, 0);
        assert!(!snap.preview);
    }
}
