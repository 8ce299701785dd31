//! Mirror Maze - a mirrored dual-world runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `platform`: Clock and storage abstraction
//! - `session`: Input collection, loop driving, observers, persistence glue
//!
//! The crate is the simulation core only. Rendering is an external consumer
//! of the per-frame [`session::Snapshot`].

pub mod platform;
pub mod session;
pub mod sim;

pub use platform::{Clock, ManualClock, Storage, SystemClock};
pub use session::{Button, NullObserver, Session, SessionObserver, Snapshot};
pub use sim::{GamePhase, GameState, TickInput, Viewport, tick};

/// Game tuning constants
///
/// All lengths and speeds are in CSS pixels at device pixel ratio 1.0 and
/// get scaled by [`sim::Viewport::dpr`] when the world is laid out.
pub mod consts {
    /// Maximum per-frame delta fed to the simulation (caps catch-up at ~30fps)
    pub const MAX_FRAME_DT: f32 = 0.034;

    /// Downward acceleration, px/s²
    pub const GRAVITY: f32 = 1600.0;
    /// Horizontal run speed, px/s
    pub const MOVE_SPEED: f32 = 260.0;
    /// Upward velocity applied on a grounded jump, px/s
    pub const JUMP_VELOCITY: f32 = -720.0;

    /// Player dimensions
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;
    /// Player start x as a fraction of world width
    pub const PLAYER_START_X_FRAC: f32 = 0.25;
    /// Top player's spawn height above the midline
    pub const TOP_SPAWN_ABOVE_MID: f32 = 110.0;
    /// Bottom player's spawn depth below the midline
    pub const BOTTOM_SPAWN_BELOW_MID: f32 = 40.0;

    /// Ceiling inset of each sub-world
    pub const CEILING_OFFSET: f32 = 20.0;
    /// Floor inset of the bottom sub-world (the top world's floor is the midline)
    pub const GROUND_OFFSET: f32 = 20.0;

    /// Goal zone width; goals match player height
    pub const GOAL_WIDTH: f32 = 40.0;
    /// Goal x as a fraction of world width (mirrored for the bottom world)
    pub const GOAL_X_FRAC: f32 = 0.9;

    /// Obstacle size ranges
    pub const OBSTACLE_WIDTH_MIN: f32 = 40.0;
    pub const OBSTACLE_WIDTH_MAX: f32 = 80.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 20.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 90.0;
    /// Extra random spacing past the right edge at spawn
    pub const SPAWN_LEAD_MAX: f32 = 220.0;
    /// Clearance range between a hanging obstacle and the resting player's head
    pub const HANG_GAP_MIN: f32 = 10.0;
    pub const HANG_GAP_MAX: f32 = 40.0;
    /// Drop range below the resting player's head for a low obstacle
    pub const LOW_DROP_MIN: f32 = 40.0;
    pub const LOW_DROP_MAX: f32 = 120.0;
    /// Scroll speed: base + level * increment, px/s leftward
    pub const OBSTACLE_BASE_SPEED: f32 = 150.0;
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 16.0;
    /// Obstacles are culled once their right edge is this far off-screen
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// First-spawn delay after a world reset: max(min, base - level * step)
    pub const SPAWN_DELAY_BASE: f32 = 1.5;
    pub const SPAWN_DELAY_STEP: f32 = 0.08;
    pub const SPAWN_DELAY_MIN: f32 = 0.6;
    /// Steady-state spawn interval: max(min, base - level * step)
    pub const SPAWN_INTERVAL_BASE: f32 = 1.2;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.06;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.35;

    /// Delay between touching both goals and the next level's world reset
    pub const LEVEL_CLEAR_DELAY: f32 = 0.2;

    /// Lives at session start / after restart
    pub const LIVES_START: u32 = 3;
    /// Lives cap (level advance heals one up to this)
    pub const LIVES_MAX: u32 = 5;

    /// Device pixel ratio is clamped to this for crispness without waste
    pub const MAX_DPR: f32 = 2.0;
}
