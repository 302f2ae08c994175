//! Ball geometry component.
//!
//! Live simulation state of a ball. During a tick it diverges from the copy
//! held by the scene [`Ball`](crate::scene::Ball) until
//! [`scene_sync_system`](crate::systems::scenesync::scene_sync_system) (or the
//! movement write-through) pushes the center back out.

use bevy_ecs::prelude::Component;

use crate::geometry::Point;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct BallGeometry {
    /// Center in normalized scene coordinates.
    pub center: Point,
    pub radius: f32,
    /// Units per second along [`MovementDirection`](super::movementdirection::MovementDirection).
    pub speed: f32,
}

impl BallGeometry {
    pub fn new(center: Point, radius: f32, speed: f32) -> Self {
        Self {
            center,
            radius,
            speed,
        }
    }

    /// Displacement covered in one tick of `delta` seconds along `direction`.
    pub fn step(&self, direction: Point, delta: f32) -> Point {
        direction * self.speed * delta
    }
}
