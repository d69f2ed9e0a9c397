//! Collision detection for the bird against pipe geometry
//!
//! Pure predicates over rectangles; the tick loop decides what a hit means.
//! Collision uses a hit box inset from the sprite bounds so near misses
//! read as misses, and a plain per-tick AABB overlap test - per-tick
//! displacement stays well under the pipe width at any reachable velocity,
//! so no swept test is needed.

use super::rect::Rect;
use super::state::{Bird, Pipe};
use crate::tuning::Tuning;

/// The bird's tightened hit box.
pub fn hitbox(bird: &Bird, tuning: &Tuning) -> Rect {
    Rect::from_corner(bird.pos + tuning.hitbox_offset, tuning.hitbox_size)
}

/// True when the bird's hit box overlaps either solid segment of the pipe.
pub fn collides(bird: &Bird, pipe: &Pipe, tuning: &Tuning) -> bool {
    let hb = hitbox(bird, tuning);
    hb.overlaps(&pipe.top_rect()) || hb.overlaps(&pipe.bottom_rect())
}
