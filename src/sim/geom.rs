//! Axis-aligned box geometry
//!
//! Every pairwise interaction in the runner is a box overlap in screen space
//! (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, size, identity and retirement flag shared by every simulated object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set when the object should be dropped at end of tick
    pub retired: bool,
}

impl Body {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            retired: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Fully scrolled past the left edge of the viewport
    #[inline]
    pub fn is_left_of_view(&self) -> bool {
        self.right() < 0.0
    }

    pub fn retire(&mut self) {
        self.retired = true;
    }
}

/// Strict overlap test: touching edges do not count
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
