//! Integer rectangle helpers for colliders and draw rects.

use bevy::math::{IRect, IVec2};
use bevy::prelude::*;

/// Rectangle with its top-left corner at `pos` and the given size.
#[inline]
pub fn rect_at(pos: IVec2, size: IVec2) -> IRect {
    IRect { min: pos, max: pos + size }
}

/// Round a world position to the integer grid used by colliders.
#[inline]
pub fn round_to_grid(v: Vec2) -> IVec2 {
    IVec2::new(v.x.round() as i32, v.y.round() as i32)
}

/// Strict overlap: touching edges do not intersect, and empty rects never intersect.
#[inline]
pub fn intersects(a: &IRect, b: &IRect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Move a rect so its top-left corner sits at `pos`, keeping its size.
#[inline]
pub fn moved_to(rect: IRect, pos: IVec2) -> IRect {
    rect_at(pos, rect.size())
}
