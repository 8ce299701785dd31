//! Session layer: input collection, loop driving and persistence glue
//!
//! Event handlers (key, pointer) only flip flags here; the simulation reads
//! a single [`TickInput`] snapshot assembled once per frame, so delivery
//! order within a frame can never race the step. The session also owns the
//! [`BestLevel`] record and an injected [`SessionObserver`] notified on
//! level advance and game over.

use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::platform::{BestLevel, Clock, Storage};
use crate::sim::{
    GameEvent, GamePhase, GameState, Obstacle, Player, Rect, TickInput, Viewport, tick,
};

/// Discrete input controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Jump,
    Pause,
    Restart,
}

/// Accumulates press/release edges between frames.
///
/// Held buttons track their current state; `Jump`, `Pause` and `Restart`
/// latch on press and are consumed by the next snapshot.
#[derive(Debug, Clone, Copy, Default)]
struct InputState {
    left_held: bool,
    right_held: bool,
    touch_left: bool,
    touch_right: bool,
    jump_queued: bool,
    pause_queued: bool,
    restart_queued: bool,
}

impl InputState {
    fn press(&mut self, button: Button) {
        match button {
            Button::Left => self.left_held = true,
            Button::Right => self.right_held = true,
            Button::Jump => self.jump_queued = true,
            Button::Pause => self.pause_queued = true,
            Button::Restart => self.restart_queued = true,
        }
    }

    fn release(&mut self, button: Button) {
        match button {
            Button::Left => self.left_held = false,
            Button::Right => self.right_held = false,
            // One-shots stay latched until the next frame consumes them
            Button::Jump | Button::Pause | Button::Restart => {}
        }
    }

    /// Map raw pointer coordinates to screen-quadrant controls: the outer
    /// quarter of either sub-world jumps, the band around the midline moves
    /// laterally by screen half.
    fn pointer_down(&mut self, x: f32, y: f32, viewport: &Viewport) {
        let mid = viewport.midline();
        if y < mid * 0.5 || y > mid + mid * 0.25 {
            self.jump_queued = true;
        } else {
            self.touch_left = x < viewport.width / 2.0;
            self.touch_right = x >= viewport.width / 2.0;
        }
    }

    fn pointer_up(&mut self) {
        self.touch_left = false;
        self.touch_right = false;
    }

    /// Build the per-frame snapshot and consume the one-shot latches.
    fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left_held || self.touch_left,
            right: self.right_held || self.touch_right,
            jump: self.jump_queued,
            pause: self.pause_queued,
            restart: self.restart_queued,
        };
        self.jump_queued = false;
        self.pause_queued = false;
        self.restart_queued = false;
        input
    }
}

/// Injected collaborator notified of session milestones.
pub trait SessionObserver {
    fn level_advanced(&mut self, _level: u32) {}
    fn game_over(&mut self, _final_level: u32, _best: u32) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Read-only per-frame view for a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub lives: u32,
    pub best: u32,
    pub phase: GamePhase,
    pub player_top: &'a Player,
    pub player_bottom: &'a Player,
    pub obstacles_top: &'a [Obstacle],
    pub obstacles_bottom: &'a [Obstacle],
    pub goal_top: &'a Rect,
    pub goal_bottom: &'a Rect,
}

/// A running game session: owned world state plus the platform collaborators.
pub struct Session {
    state: GameState,
    input: InputState,
    best: BestLevel,
    storage: Box<dyn Storage>,
    observer: Box<dyn SessionObserver>,
}

impl Session {
    /// Start a session: the best-level record is read once from storage and
    /// seeds the world's `best` field.
    pub fn new(
        seed: u64,
        viewport: Viewport,
        storage: Box<dyn Storage>,
        observer: Box<dyn SessionObserver>,
    ) -> Self {
        let best = BestLevel::load(storage.as_ref());
        let state = GameState::new(seed, viewport, best.value());
        log::info!(
            "session start: seed {seed}, {}x{} @{}x, best {}",
            viewport.width,
            viewport.height,
            viewport.dpr,
            best.value()
        );
        Self {
            state,
            input: InputState::default(),
            best,
            storage,
            observer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable world access for embedders building custom scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.state.level,
            lives: self.state.lives,
            best: self.state.best,
            phase: self.state.phase,
            player_top: &self.state.player_top,
            player_bottom: &self.state.player_bottom,
            obstacles_top: &self.state.obstacles_top,
            obstacles_bottom: &self.state.obstacles_bottom,
            goal_top: &self.state.goal_top,
            goal_bottom: &self.state.goal_bottom,
        }
    }

    pub fn button_down(&mut self, button: Button) {
        self.input.press(button);
    }

    pub fn button_up(&mut self, button: Button) {
        self.input.release(button);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let viewport = self.state.viewport;
        self.input.pointer_down(x, y, &viewport);
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    /// Adopt a new viewport (recomputes all level geometry).
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.state.resize(Viewport::new(width, height, dpr));
    }

    /// Run one frame: clamp the delta, snapshot input, step the simulation
    /// and dispatch whatever the step produced.
    pub fn frame(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        let input = self.input.snapshot();
        tick(&mut self.state, &input, dt);

        for event in self.state.drain_events() {
            match event {
                GameEvent::LevelAdvanced { level } => {
                    self.best.record(level, self.storage.as_mut());
                    self.state.best = self.best.value();
                    self.observer.level_advanced(level);
                }
                GameEvent::LifeLost { lives } => {
                    log::debug!("life lost, {lives} remaining");
                }
                GameEvent::GameOver { final_level } => {
                    self.best.record(final_level, self.storage.as_mut());
                    self.state.best = self.best.value();
                    self.observer.game_over(final_level, self.best.value());
                }
            }
        }
    }

    /// Drive frames off a clock until the run ends or the clock stops.
    /// Paused frames keep sampling the clock, so resuming never produces a
    /// catch-up delta.
    pub fn run(&mut self, clock: &mut dyn Clock) {
        while let Some(dt) = clock.wait_next_tick() {
            self.frame(dt);
            if self.state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, MemoryStorage};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> Session {
        Session::new(
            5,
            Viewport::default(),
            Box::new(MemoryStorage::new()),
            Box::new(NullObserver),
        )
    }

    #[test]
    fn test_one_shot_buttons_are_consumed() {
        let mut s = session();
        // Settle players first so the jump takes
        for _ in 0..120 {
            s.frame(DT);
        }
        s.button_down(Button::Jump);
        s.frame(DT);
        assert!(!s.state().player_top.on_ground);
        let vy = s.state().player_top.vel.y;
        // The latch is cleared; the next frame must not re-jump
        s.frame(DT);
        assert!(s.state().player_top.vel.y > vy);
    }

    #[test]
    fn test_held_buttons_persist_until_release() {
        let mut s = session();
        s.button_down(Button::Right);
        let x0 = s.state().player_top.pos.x;
        s.frame(DT);
        s.frame(DT);
        let x1 = s.state().player_top.pos.x;
        assert!(x1 > x0);
        s.button_up(Button::Right);
        s.frame(DT);
        assert_eq!(s.state().player_top.pos.x, x1);
    }

    #[test]
    fn test_pointer_quadrants() {
        let mut s = session();
        let vp = s.state().viewport;
        let mid = vp.midline();

        // Upper quarter of the top world: jump
        s.pointer_down(vp.width * 0.8, mid * 0.25);
        assert!(s.input.jump_queued);
        s.input.jump_queued = false;

        // Band just above the midline: lateral by screen half
        s.pointer_down(vp.width * 0.1, mid * 0.8);
        assert!(s.input.touch_left);
        assert!(!s.input.touch_right);
        s.pointer_up();
        assert!(!s.input.touch_left);

        // Deep bottom world: jump
        s.pointer_down(vp.width * 0.5, mid + mid * 0.5);
        assert!(s.input.jump_queued);
        s.input.jump_queued = false;

        // Just below the midline: lateral
        s.pointer_down(vp.width * 0.9, mid + mid * 0.1);
        assert!(s.input.touch_right);
    }

    #[test]
    fn test_frame_clamps_large_and_hostile_deltas() {
        let mut s = session();
        let timer = s.state().spawn_timer;
        s.frame(10.0);
        // Only one clamped step's worth of time may elapse
        assert!((timer - s.state().spawn_timer - MAX_FRAME_DT).abs() < 1e-6);
        let timer = s.state().spawn_timer;
        s.frame(f32::NAN);
        assert_eq!(s.state().spawn_timer, timer);
    }

    #[test]
    fn test_best_written_through_on_game_over() {
        #[derive(Default)]
        struct Recorder {
            game_overs: Vec<(u32, u32)>,
        }
        impl SessionObserver for Rc<RefCell<Recorder>> {
            fn game_over(&mut self, final_level: u32, best: u32) {
                self.borrow_mut().game_overs.push((final_level, best));
            }
        }

        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut s = Session::new(
            5,
            Viewport::default(),
            Box::new(MemoryStorage::new()),
            Box::new(recorder.clone()),
        );
        s.state.level = 4;
        s.state.lives = 1;
        s.state.lose_life();
        s.frame(DT); // drains the event
        assert_eq!(recorder.borrow().game_overs, vec![(4, 4)]);
        assert_eq!(s.state().best, 4);
    }

    #[test]
    fn test_run_stops_with_the_clock() {
        let mut s = session();
        let mut clock = ManualClock::fixed(DT, 180);
        s.run(&mut clock);
        // Three seconds of idle play: still alive, world populated
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert!(!s.state().obstacles_top.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let s = session();
        let json = serde_json::to_string(&s.snapshot()).unwrap();
        assert!(json.contains("\"level\":1"));
        assert!(json.contains("player_top"));
    }
}
