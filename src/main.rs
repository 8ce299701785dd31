//! Mirror Maze headless demo
//!
//! Runs the simulation against the system clock with a trivial autopilot
//! and file-backed best-level persistence, logging session milestones.
//! A presentation layer would consume [`mirror_maze::Snapshot`] instead of
//! the log lines.

use std::time::SystemTime;

use mirror_maze::platform::JsonFileStorage;
use mirror_maze::sim::{GamePhase, Viewport};
use mirror_maze::{Button, Clock, Session, SessionObserver, SystemClock};

struct LogObserver;

impl SessionObserver for LogObserver {
    fn level_advanced(&mut self, level: u32) {
        log::info!("advanced to level {level}");
    }

    fn game_over(&mut self, final_level: u32, best: u32) {
        log::info!("game over at level {final_level}, best {best}");
    }
}

/// Hold right toward the goal; jump when the nearest obstacle gets close.
fn autopilot(session: &mut Session) {
    session.button_down(Button::Right);
    let state = session.state();
    let player_front = state.player_top.rect().right();
    let near = state
        .obstacles_top
        .iter()
        .any(|o| o.rect.pos.x > player_front && o.rect.pos.x - player_front < 120.0);
    if near && state.player_top.on_ground {
        session.button_down(Button::Jump);
    }
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let storage = JsonFileStorage::open("mirror_maze_save.json");

    let mut session = Session::new(
        seed,
        Viewport::new(960.0, 540.0, 1.0),
        Box::new(storage),
        Box::new(LogObserver),
    );
    let mut clock = SystemClock::new(60.0);

    // Thirty seconds of play, or a finished run, whichever comes first
    let max_frames = 30 * 60;
    let mut elapsed = 0.0f32;
    let mut next_report = 1.0f32;

    for _ in 0..max_frames {
        let Some(dt) = clock.wait_next_tick() else {
            break;
        };
        autopilot(&mut session);
        session.frame(dt);
        if session.state().phase == GamePhase::GameOver {
            break;
        }

        elapsed += dt;
        if elapsed >= next_report {
            next_report += 1.0;
            let snap = session.snapshot();
            log::info!(
                "t={elapsed:.0}s level {} lives {} best {} obstacles {}",
                snap.level,
                snap.lives,
                snap.best,
                snap.obstacles_top.len()
            );
        }
    }

    let snap = session.snapshot();
    println!(
        "finished: level {} lives {} best {}",
        snap.level, snap.lives, snap.best
    );
}
