//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Externally supplied, pre-clamped time deltas
//! - No rendering or platform dependencies
//!
//! The session layer owns a [`GameState`] and calls [`tick`] once per frame.

pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geom::{Rect, mirror_across_midline, mirror_x};
pub use spawn::spawn_obstacle_pair;
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, Player, Viewport, spawn_delay, spawn_interval,
};
pub use tick::{TickInput, tick};
