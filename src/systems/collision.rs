//! Ball-vs-wall collision resolution.
//!
//! For each ball the system looks at the position the ball occupied at the
//! start of its last step (`center - direction * speed * delta`) and tests it
//! against every wall with [`circle_segment_contact`]. This is a proximity
//! check at a single position, not a sweep, so every contact reports time `0`
//! and a fast ball can pass through a thin wall between ticks.
//!
//! # Resolution
//!
//! Only the nearest contact is resolved, once per ball per tick:
//!
//! 1. `center = previous + step * time` (with time `0` this resets the ball to
//!    its previous position)
//! 2. the direction is reflected about the contact normal and renormalized
//! 3. `center += new_direction * speed * delta * (1 - time)`
//!
//! Contacts are compared with a strict `<` on time, so when several walls
//! touch the ball the first one in query order wins. Corners where two walls
//! meet get no special treatment.
//!
//! Degenerate walls are skipped.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::components::ballgeometry::BallGeometry;
use crate::components::movementdirection::MovementDirection;
use crate::components::sceneobjectref::SceneObjectRef;
use crate::components::wallgeometry::WallGeometry;
use crate::error::SimError;
use crate::geometry::{Contact, Point, Segment, circle_segment_contact, reflect};
use crate::resources::worldtime::WorldTime;

pub fn collision_system(
    time: Res<WorldTime>,
    mut balls: Query<(Entity, &mut BallGeometry, &mut MovementDirection)>,
    walls: Query<&WallGeometry, With<SceneObjectRef>>,
) {
    let dt = time.delta;
    for (entity, mut ball, mut direction) in balls.iter_mut() {
        let step = ball.step(direction.as_vec(), dt);
        let previous = ball.center - step;

        let Some(contact) = nearest_contact(
            previous,
            ball.radius,
            walls.iter().map(WallGeometry::segment),
        ) else {
            continue;
        };

        ball.center = previous + step * contact.time;
        debug!(
            "Wall collision for {:?}: time {:.3}, normal [{:.3}, {:.3}]",
            entity, contact.time, contact.normal.x, contact.normal.y
        );

        let reflected = reflect(direction.as_vec(), contact.normal);
        direction.set(reflected);
        debug!("New direction: [{:.3}, {:.3}]", direction.x, direction.y);

        let remaining = 1.0 - contact.time;
        let rest = ball.step(reflected, dt) * remaining;
        ball.center += rest;
    }
}

/// Earliest contact between a circle at `center` and any of `segments`.
///
/// Ties keep the first contact found. Degenerate segments never produce a
/// contact.
pub fn nearest_contact(
    center: Point,
    radius: f32,
    segments: impl IntoIterator<Item = Segment>,
) -> Option<Contact> {
    let mut closest: Option<Contact> = None;
    let mut closest_time = 1.0_f32;

    for segment in segments {
        match circle_segment_contact(center, radius, &segment) {
            Ok(Some(contact)) if contact.time < closest_time => {
                closest_time = contact.time;
                closest = Some(contact);
            }
            Ok(_) => {}
            Err(SimError::DegenerateGeometry { length }) => {
                trace!("Skipping degenerate wall (length {length})");
            }
            Err(e) => trace!("Skipping wall: {e}"),
        }
    }

    closest
}
