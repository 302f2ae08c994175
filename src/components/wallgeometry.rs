//! Wall geometry component.
//!
//! A snapshot of a scene [`Wall`](crate::scene::Wall) segment, taken once by
//! [`wall_init_system`](crate::systems::init::wall_init_system). Walls never
//! move, so the snapshot is not refreshed afterwards.

use bevy_ecs::prelude::Component;

use crate::geometry::{Point, Segment};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct WallGeometry {
    pub start: Point,
    pub end: Point,
}

impl WallGeometry {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}
