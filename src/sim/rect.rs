//! Axis-aligned rectangle geometry for tiles and actors
//!
//! World pixel coordinates, top-left origin, y increasing downward:
//! - x, y: top-left corner
//! - width, height: extent to the right and downward

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from grid cells (origin cell + extent in cells)
    pub fn from_cells(col: i32, row: i32, cols: u32, rows: u32, cell: f32) -> Self {
        Self::new(
            col as f32 * cell,
            row as f32 * cell,
            cols as f32 * cell,
            rows as f32 * cell,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the box by a displacement
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// True if the horizontal spans share a non-zero interval
    #[inline]
    pub fn spans_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 32.0, 64.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 42.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 84.0);
        assert_eq!(r.center(), Vec2::new(26.0, 52.0));
    }

    #[test]
    fn test_from_cells() {
        let r = Rect::from_cells(3, 13, 2, 1, 32.0);
        assert_eq!(r, Rect::new(96.0, 416.0, 64.0, 32.0));
    }

    #[test]
    fn test_translate() {
        let mut r = Rect::new(0.0, 0.0, 1.0, 1.0);
        r.translate(Vec2::new(2.5, -1.0));
        assert_eq!((r.x, r.y), (2.5, -1.0));
    }
}
