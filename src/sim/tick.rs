//! Per-frame simulation step
//!
//! One call advances the whole world by `dt` seconds: input intent, jump,
//! gravity, per-sub-world bounds, obstacle scroll, spawning, collision and
//! goal checks, in that order. A collision ends the step early so no goal
//! can be scored on the same frame as a hit.

use super::geom::mirror_x;
use super::spawn::spawn_obstacle_pair;
use super::state::{GamePhase, GameState, Player, spawn_interval};
use crate::consts::*;

/// Input snapshot for a single tick
///
/// `left`/`right` are held flags; `jump`, `pause` and `restart` are one-shot
/// edges latched by the session layer and cleared after each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub pause: bool,
    pub restart: bool,
}

impl TickInput {
    /// Resolve held movement flags to a single directional intent.
    /// When both are held, right wins (last-evaluated flag order).
    pub fn intent(&self) -> f32 {
        let mut intent = 0.0;
        if self.left {
            intent = -1.0;
        }
        if self.right {
            intent = 1.0;
        }
        intent
    }
}

/// Clamp a player into its sub-world's vertical band.
fn resolve_bounds(player: &mut Player, ceiling_y: f32, ground_y: f32) {
    if player.pos.y > ground_y {
        player.pos.y = ground_y;
        player.vel.y = 0.0;
        player.on_ground = true;
    } else if player.pos.y < ceiling_y {
        player.pos.y = ceiling_y;
        player.vel.y = 0.0;
    } else {
        player.on_ground = false;
    }
}

/// Advance the game state by `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
    }
    if input.pause {
        state.toggle_pause();
    }
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    // A hostile delta must not corrupt position state
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    // Between levels: run down the reset delay, nothing else moves
    if let Some(remaining) = state.pending_reset {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.reset_world();
        } else {
            state.pending_reset = Some(remaining);
        }
        return;
    }

    let vp = state.viewport;
    let mid = vp.midline();

    // Horizontal intent, mirrored for the bottom world: pressing right moves
    // the top player right and the bottom player left.
    let intent = input.intent();
    let speed = vp.px(MOVE_SPEED);
    state.player_top.vel.x = intent * speed;
    state.player_bottom.vel.x = -intent * speed;
    state.player_top.pos.x += state.player_top.vel.x * dt;
    state.player_bottom.pos.x += state.player_bottom.vel.x * dt;

    // One jump input fires both players; each gates on its own grounding
    if input.jump {
        let impulse = vp.px(JUMP_VELOCITY);
        state.player_top.jump(impulse);
        state.player_bottom.jump(impulse);
    }

    // Gravity, semi-implicit Euler per player
    let gravity = vp.px(GRAVITY);
    for player in [&mut state.player_top, &mut state.player_bottom] {
        player.vel.y += gravity * dt;
        player.pos.y += player.vel.y * dt;
    }

    // Each sub-world has its own ceiling and ground line
    let top_max_y = mid - state.player_top.size.y;
    resolve_bounds(&mut state.player_top, vp.px(CEILING_OFFSET), top_max_y);
    let bottom_max_y = vp.height - state.player_bottom.size.y - vp.px(GROUND_OFFSET);
    resolve_bounds(
        &mut state.player_bottom,
        mid + vp.px(CEILING_OFFSET),
        bottom_max_y,
    );

    // Scroll obstacles. Only the top list is integrated; the bottom x is
    // recomputed through the mirror so the pair alignment cannot drift.
    let cull_x = -vp.px(DESPAWN_MARGIN);
    let mut i = state.obstacles_top.len();
    while i > 0 {
        i -= 1;
        let top = &mut state.obstacles_top[i];
        top.rect.pos.x += top.vx * dt;
        state.obstacles_bottom[i].rect.pos.x =
            mirror_x(top.rect.pos.x, top.rect.size.x, vp.width);
        if state.obstacles_top[i].rect.right() < cull_x {
            state.obstacles_top.remove(i);
            state.obstacles_bottom.remove(i);
        }
    }

    // Spawn cadence shortens as the level climbs
    state.spawn_timer -= dt;
    if state.spawn_timer <= 0.0 {
        spawn_obstacle_pair(state);
        state.spawn_timer = spawn_interval(state.level);
    }

    // A hit in either sub-world costs a life and ends the step
    let top_rect = state.player_top.rect();
    let bottom_rect = state.player_bottom.rect();
    let hit = state
        .obstacles_top
        .iter()
        .any(|o| o.rect.overlaps(&top_rect))
        || state
            .obstacles_bottom
            .iter()
            .any(|o| o.rect.overlaps(&bottom_rect));
    if hit {
        state.lose_life();
        return;
    }

    // Advancing requires both goals on the same frame
    if top_rect.overlaps(&state.goal_top) && bottom_rect.overlaps(&state.goal_bottom) {
        state.advance_level();
    }
}
