//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]: both players,
//! both obstacle lists, the goal pair, level/lives bookkeeping and the
//! session RNG. There are no ambient globals; the tick function receives the
//! state by `&mut` and the session layer owns it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, mirror_x};
use crate::consts::*;

/// World coordinate space, supplied by the embedder (device-pixel-scaled)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio, clamped to `[1, MAX_DPR]`
    pub dpr: f32,
}

impl Viewport {
    /// Build a viewport, sanitizing whatever the embedder hands us.
    /// Non-finite or non-positive dimensions fall back to a 960x540 space.
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() {
            dpr.clamp(1.0, MAX_DPR)
        } else {
            1.0
        };
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Self { width, height, dpr }
        } else {
            log::warn!("invalid viewport {width}x{height}, using 960x540");
            Self {
                width: 960.0 * dpr,
                height: 540.0 * dpr,
                dpr,
            }
        }
    }

    /// Scale a dpr=1 tuning constant into this viewport's pixel space
    #[inline]
    pub fn px(&self, v: f32) -> f32 {
        v * self.dpr
    }

    /// Horizontal midline separating the two sub-worlds
    #[inline]
    pub fn midline(&self) -> f32 {
        (self.height / 2.0).floor()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(960.0, 540.0, 1.0)
    }
}

/// A player avatar (one per sub-world)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Top-left position
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Resting on this sub-world's ground line; gates jumping
    pub on_ground: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Apply a jump impulse if grounded. Consumes the grounded state; an
    /// airborne player ignores the request entirely.
    pub fn jump(&mut self, impulse: f32) {
        if self.on_ground {
            self.vel.y = impulse;
            self.on_ground = false;
        }
    }
}

/// A scrolling obstacle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Horizontal scroll speed, always negative (toward the goal side)
    pub vx: f32,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation suspended; state is retained
    Paused,
    /// Run ended; waiting for an explicit restart
    GameOver,
}

/// Discrete outcomes of a tick, drained by the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Both goals were reached; `level` is the level just entered
    LevelAdvanced { level: u32 },
    /// A collision cost a life but the run continues
    LifeLost { lives: u32 },
    /// Final collision; `final_level` is the level reached before the reset
    GameOver { final_level: u32 },
}

/// First-spawn delay after a world reset (shrinks with level)
pub fn spawn_delay(level: u32) -> f32 {
    (SPAWN_DELAY_BASE - level as f32 * SPAWN_DELAY_STEP).max(SPAWN_DELAY_MIN)
}

/// Steady-state spawn interval (shrinks with level)
pub fn spawn_interval(level: u32) -> f32 {
    (SPAWN_INTERVAL_BASE - level as f32 * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
}

/// Complete world/session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving obstacle generation
    pub rng: Pcg32,
    pub viewport: Viewport,
    /// Current level, >= 1, non-decreasing within a run
    pub level: u32,
    /// Remaining lives, within `[1, LIVES_MAX]` while playing
    pub lives: u32,
    /// Best level ever reached (monotone; persisted by the session layer)
    pub best: u32,
    pub phase: GamePhase,
    /// Seconds until the next obstacle pair
    pub spawn_timer: f32,
    /// Countdown to the post-level-advance world reset, when scheduled
    pub pending_reset: Option<f32>,
    pub player_top: Player,
    pub player_bottom: Player,
    /// Index-aligned mirror pair lists: `obstacles_bottom[i]` is always the
    /// mirror of `obstacles_top[i]`
    pub obstacles_top: Vec<Obstacle>,
    pub obstacles_bottom: Vec<Obstacle>,
    pub goal_top: Rect,
    pub goal_bottom: Rect,
    /// Events produced since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session at level 1 and lay out the first world.
    /// `best` comes from persistent storage (baseline 1).
    pub fn new(seed: u64, viewport: Viewport, best: u32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            level: 1,
            lives: LIVES_START,
            best: best.max(1),
            phase: GamePhase::Playing,
            spawn_timer: 0.0,
            pending_reset: None,
            player_top: Player::new(Vec2::ZERO, Vec2::ZERO),
            player_bottom: Player::new(Vec2::ZERO, Vec2::ZERO),
            obstacles_top: Vec::new(),
            obstacles_bottom: Vec::new(),
            goal_top: Rect::new(0.0, 0.0, 0.0, 0.0),
            goal_bottom: Rect::new(0.0, 0.0, 0.0, 0.0),
            events: Vec::new(),
        };
        state.reset_world();
        state
    }

    fn make_player(&self, y: f32) -> Player {
        let vp = &self.viewport;
        Player::new(
            Vec2::new((vp.width * PLAYER_START_X_FRAC).floor(), y),
            Vec2::new(vp.px(PLAYER_WIDTH), vp.px(PLAYER_HEIGHT)),
        )
    }

    /// Rebuild the level geometry for the current level: both players at
    /// their start offsets, obstacle lists cleared, goals recomputed near
    /// the right edge, spawn timer re-armed.
    pub fn reset_world(&mut self) {
        let vp = self.viewport;
        let mid = vp.midline();

        self.player_top = self.make_player(mid - vp.px(TOP_SPAWN_ABOVE_MID));
        self.player_bottom = self.make_player(mid + vp.px(BOTTOM_SPAWN_BELOW_MID));
        self.player_bottom.pos.x = mirror_x(
            self.player_top.pos.x,
            self.player_top.size.x,
            vp.width,
        );

        self.obstacles_top.clear();
        self.obstacles_bottom.clear();

        let goal_size = Vec2::new(vp.px(GOAL_WIDTH), self.player_top.size.y);
        self.goal_top = Rect {
            pos: Vec2::new((vp.width * GOAL_X_FRAC).floor(), self.player_top.pos.y),
            size: goal_size,
        };
        self.goal_bottom = Rect {
            pos: Vec2::new(
                mirror_x(self.goal_top.pos.x, goal_size.x, vp.width),
                self.player_bottom.pos.y,
            ),
            size: goal_size,
        };

        self.spawn_timer = spawn_delay(self.level);
        self.pending_reset = None;
    }

    /// Both goals reached: bump the level, heal one life, schedule the next
    /// world after a short delay so the pass-through registers visually.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.best = self.best.max(self.level);
        self.lives = (self.lives + 1).min(LIVES_MAX);
        self.pending_reset = Some(LEVEL_CLEAR_DELAY);
        log::info!("level {} reached (lives {})", self.level, self.lives);
        self.events.push(GameEvent::LevelAdvanced { level: self.level });
    }

    /// A collision: lose a life, reset the world, or end the run.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            // Capture the high score from the level actually achieved,
            // before the bookkeeping below re-arms it for the next run.
            let final_level = self.level;
            self.best = self.best.max(final_level);
            log::info!("game over at level {final_level} (best {})", self.best);
            self.level = 1;
            self.lives = LIVES_START;
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { final_level });
        } else {
            log::debug!("hit at level {} ({} lives left)", self.level, self.lives);
            self.events.push(GameEvent::LifeLost { lives: self.lives });
            self.reset_world();
        }
    }

    /// Explicit restart, legal in any phase.
    pub fn restart(&mut self) {
        self.level = 1;
        self.lives = LIVES_START;
        self.best = self.best.max(self.level);
        self.phase = GamePhase::Playing;
        self.reset_world();
    }

    /// Adopt a new viewport and recompute all level geometry.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reset_world();
    }

    /// Toggle between Playing and Paused; ignored once the run has ended.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Take the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
