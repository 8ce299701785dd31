//! Rectangle geometry and mirror transforms
//!
//! The whole game is built out of axis-aligned rectangles related by two
//! reflections: a horizontal flip across the screen's vertical centerline
//! and a vertical flip across the horizontal midline separating the two
//! sub-worlds. Both transforms are involutions for a fixed size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict-overlap test: rectangles sharing only an edge do not intersect
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Reflect a horizontal position across the world's vertical centerline
/// so the object's span occupies the mirrored extent: `x' = world_w - x - w`
#[inline]
pub fn mirror_x(x: f32, w: f32, world_w: f32) -> f32 {
    world_w - x - w
}

/// Reflect a vertical position into the opposite sub-world, preserving the
/// distance from the midline.
///
/// For an object of height `h` sitting `d = mid - y` above the midline, the
/// mirrored object's top edge lands at `mid + d - h` so its *far* edge sits
/// at the mirrored distance. Involutive for a fixed `h`.
#[inline]
pub fn mirror_across_midline(y: f32, h: f32, mid: f32) -> f32 {
    let dist = mid - y;
    mid + dist - h
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_shared_edge_is_not_a_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // b starts exactly where a ends
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // One unit of overlap registers
        let c = Rect::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_overlap_shared_corner_is_not_a_hit() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_mirror_x() {
        // 40-wide object at x=100 in a 960-wide world
        assert_eq!(mirror_x(100.0, 40.0, 960.0), 820.0);
    }

    #[test]
    fn test_mirror_across_midline() {
        // Object resting on the top world's ground (bottom edge at the
        // midline) maps to one whose top edge is at the midline.
        let mid = 270.0;
        let h = 36.0;
        assert_eq!(mirror_across_midline(mid - h, h, mid), mid);
    }

    proptest! {
        #[test]
        fn prop_mirror_x_involution(x in -2000.0f32..2000.0, w in 1.0f32..200.0) {
            let world_w = 960.0;
            let round_trip = mirror_x(mirror_x(x, w, world_w), w, world_w);
            // Bit-exact only on representable sums; allow f32 rounding
            prop_assert!((round_trip - x).abs() < 1e-3);
        }

        #[test]
        fn prop_mirror_midline_involution(y in -2000.0f32..2000.0, h in 1.0f32..200.0) {
            let mid = 270.0;
            let round_trip = mirror_across_midline(mirror_across_midline(y, h, mid), h, mid);
            prop_assert!((round_trip - y).abs() < 1e-3);
        }

        #[test]
        fn prop_mirror_midline_preserves_distance(y in -500.0f32..500.0, h in 1.0f32..200.0) {
            let mid = 270.0;
            let y2 = mirror_across_midline(y, h, mid);
            // Distance from midline to near edge equals distance to the
            // mirrored object's far edge.
            prop_assert!(((mid - y) - (y2 + h - mid)).abs() < 1e-3);
        }
    }
}
