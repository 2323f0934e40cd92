//! Collision detection and response for axis-aligned boxes
//!
//! Hits are classified by where the mover's edges were *before* this frame's
//! displacement, not by the smallest overlap. Minimum-overlap classification
//! misreads fast movers and corner contacts; landing must also win over
//! wall-sliding, so the vertical cases are checked first.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::CONTACT_EPSILON;

/// Which face of the obstacle the mover struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Landed on the obstacle's top face
    Top,
    /// Rose into the obstacle's bottom face
    Bottom,
    /// Struck the obstacle's left face (mover was heading right)
    Left,
    /// Struck the obstacle's right face (mover was heading left)
    Right,
    /// No overlap
    None,
}

/// True iff the boxes intersect with non-zero area (touching edges don't count)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Classify an overlap between a mover and a stationary obstacle
///
/// `delta` is the displacement the mover just applied this frame (its
/// velocity). A descending mover whose bottom edge was at or above the
/// obstacle's top lands on it; a rising mover whose top edge was at or below
/// the obstacle's bottom bonks it. Everything else is a side hit chosen by the
/// sign of horizontal motion, or by which side the mover's center is on when
/// it has none.
pub fn resolve_directional(mover: &Rect, obstacle: &Rect, delta: Vec2) -> Direction {
    if !overlaps(mover, obstacle) {
        return Direction::None;
    }

    if delta.y > 0.0 && mover.bottom() - delta.y <= obstacle.top() {
        return Direction::Top;
    }
    if delta.y < 0.0 && mover.top() - delta.y >= obstacle.bottom() {
        return Direction::Bottom;
    }

    if delta.x > 0.0 {
        Direction::Left
    } else if delta.x < 0.0 {
        Direction::Right
    } else if mover.center().x < obstacle.center().x {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Move the mover flush against the struck face so the boxes no longer overlap
pub fn separate(mover: &mut Rect, obstacle: &Rect, direction: Direction) {
    match direction {
        Direction::Top => mover.y = obstacle.top() - mover.height,
        Direction::Bottom => mover.y = obstacle.bottom(),
        Direction::Left => mover.x = obstacle.left() - mover.width,
        Direction::Right => mover.x = obstacle.right(),
        Direction::None => {}
    }
}

/// Check if a mover is resting on top of an obstacle without overlapping it
///
/// Bodies snapped onto a tile sit exactly on its top edge, which the strict
/// overlap test does not report, so grounding needs its own check.
#[inline]
pub fn supports(mover: &Rect, obstacle: &Rect, velocity: Vec2) -> bool {
    velocity.y >= 0.0
        && mover.spans_x(obstacle)
        && (mover.bottom() - obstacle.top()).abs() <= CONTACT_EPSILON
}
