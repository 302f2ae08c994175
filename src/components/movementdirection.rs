//! Movement direction component.
//!
//! Unit vector a ball travels along. It is only momentarily non-unit while the
//! collision system reflects it, and is renormalized before the system moves on.

use bevy_ecs::prelude::Component;

use crate::geometry::Point;

/// Direction of travel, `(0, 1)` by default.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovementDirection {
    pub x: f32,
    pub y: f32,
}

impl Default for MovementDirection {
    fn default() -> Self {
        Self { x: 0.0, y: 1.0 }
    }
}

impl MovementDirection {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Normalized direction; a zero vector falls back to the default.
    pub fn from_vec(v: Point) -> Self {
        let v = v.try_normalize().unwrap_or(Point::Y);
        Self { x: v.x, y: v.y }
    }

    pub fn as_vec(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set(&mut self, v: Point) {
        self.x = v.x;
        self.y = v.y;
    }
}
