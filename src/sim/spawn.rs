//! Mirrored obstacle pair generation
//!
//! Only the top-world obstacle is ever randomized. Its bottom-world partner
//! is derived through the mirror transforms, so the index-aligned lists can
//! never disagree about width, height or speed.

use glam::Vec2;
use rand::Rng;

use super::geom::{Rect, mirror_across_midline, mirror_x};
use super::state::{GameState, Obstacle};
use crate::consts::*;

/// Spawn one obstacle pair just off the right edge of the visible area.
///
/// The top obstacle is placed either clearly above the resting player's head
/// (jump under it) or clearly below it (jump over it), chosen by a fair coin
/// flip, so every spawn is passable. Scroll speed grows with level.
pub fn spawn_obstacle_pair(state: &mut GameState) {
    let vp = state.viewport;
    let mid = vp.midline();
    let player_h = state.player_top.size.y;
    // y of the resting top player's head (its ground line is the midline)
    let rest_top = mid - player_h;

    let w = state
        .rng
        .random_range(vp.px(OBSTACLE_WIDTH_MIN)..vp.px(OBSTACLE_WIDTH_MAX));
    let h = state
        .rng
        .random_range(vp.px(OBSTACLE_HEIGHT_MIN)..vp.px(OBSTACLE_HEIGHT_MAX));
    let x = vp.width + w + state.rng.random_range(0.0..vp.px(SPAWN_LEAD_MAX));

    let hanging = state.rng.random_bool(0.5);
    let y = if hanging {
        // Leave headroom to run under
        rest_top - h - state.rng.random_range(vp.px(HANG_GAP_MIN)..vp.px(HANG_GAP_MAX))
    } else {
        // Low enough to clear with a jump
        rest_top + state.rng.random_range(vp.px(LOW_DROP_MIN)..vp.px(LOW_DROP_MAX))
    };

    let vx = -vp.px(OBSTACLE_BASE_SPEED + state.level as f32 * OBSTACLE_SPEED_PER_LEVEL);

    let top = Obstacle {
        rect: Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        },
        vx,
    };
    let bottom = Obstacle {
        rect: Rect {
            pos: Vec2::new(
                mirror_x(top.rect.pos.x, w, vp.width),
                mirror_across_midline(top.rect.pos.y, h, mid),
            ),
            size: top.rect.size,
        },
        vx,
    };

    state.obstacles_top.push(top);
    state.obstacles_bottom.push(bottom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    fn state(seed: u64) -> GameState {
        GameState::new(seed, Viewport::default(), 1)
    }

    #[test]
    fn test_spawn_appends_aligned_mirror_pair() {
        let mut s = state(1);
        let mid = s.viewport.midline();
        for _ in 0..50 {
            spawn_obstacle_pair(&mut s);
        }
        assert_eq!(s.obstacles_top.len(), s.obstacles_bottom.len());
        for (top, bottom) in s.obstacles_top.iter().zip(&s.obstacles_bottom) {
            assert_eq!(
                bottom.rect.pos.x,
                mirror_x(top.rect.pos.x, top.rect.size.x, s.viewport.width)
            );
            assert_eq!(
                bottom.rect.pos.y,
                mirror_across_midline(top.rect.pos.y, top.rect.size.y, mid)
            );
            assert_eq!(bottom.rect.size, top.rect.size);
            assert_eq!(bottom.vx, top.vx);
        }
    }

    #[test]
    fn test_spawn_is_passable() {
        let mut s = state(2);
        let mid = s.viewport.midline();
        let rest_top = mid - s.player_top.size.y;
        for _ in 0..200 {
            spawn_obstacle_pair(&mut s);
        }
        for obs in &s.obstacles_top {
            let hanging = obs.rect.bottom() <= rest_top - s.viewport.px(HANG_GAP_MIN);
            let low = obs.rect.pos.y >= rest_top + s.viewport.px(LOW_DROP_MIN);
            assert!(hanging || low, "obstacle blocks the resting line: {obs:?}");
        }
    }

    #[test]
    fn test_spawns_start_off_screen_and_scroll_left() {
        let mut s = state(3);
        for _ in 0..50 {
            spawn_obstacle_pair(&mut s);
        }
        for obs in &s.obstacles_top {
            assert!(obs.rect.pos.x >= s.viewport.width);
            assert!(obs.vx < 0.0);
        }
    }

    #[test]
    fn test_speed_scales_with_level() {
        let mut s1 = state(4);
        spawn_obstacle_pair(&mut s1);
        let mut s9 = state(4);
        s9.level = 9;
        spawn_obstacle_pair(&mut s9);
        assert!(s9.obstacles_top[0].vx < s1.obstacles_top[0].vx);
    }

    #[test]
    fn test_deterministic_for_a_seed() {
        let mut a = state(42);
        let mut b = state(42);
        for _ in 0..10 {
            spawn_obstacle_pair(&mut a);
            spawn_obstacle_pair(&mut b);
        }
        for (x, y) in a.obstacles_top.iter().zip(&b.obstacles_top) {
            assert_eq!(x.rect, y.rect);
        }
    }
}
