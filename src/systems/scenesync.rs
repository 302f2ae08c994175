//! Scene write-back.
//!
//! The ECS is authoritative while the simulation runs; the [`Scene`] is what
//! external consumers read. [`scene_sync_system`] copies every ball's current
//! center out to its originating scene object. It is a pure write-through, so
//! running it twice without movement in between changes nothing.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::ballgeometry::BallGeometry;
use crate::components::sceneobjectref::SceneObjectRef;
use crate::geometry::Point;
use crate::scene::{Ball, Scene, SceneObjectId};

/// Copies [`BallGeometry::center`] into the referenced scene [`Ball`].
pub fn scene_sync_system(
    query: Query<(&BallGeometry, &SceneObjectRef)>,
    mut scene: ResMut<Scene>,
) {
    for (ball, object_ref) in query.iter() {
        if let Some(target) = object_ref.target {
            write_back(&mut scene, target, ball.center);
        }
    }
}

/// Writes `center` into the scene ball `target`.
///
/// Returns `false` when the target was removed from the scene or is not a ball.
pub fn write_back(scene: &mut Scene, target: SceneObjectId, center: Point) -> bool {
    match scene.get_as_mut::<Ball>(target) {
        Some(ball) => {
            ball.center = center;
            true
        }
        None => {
            trace!("Scene object {target} is gone or not a ball; skipping write-back");
            false
        }
    }
}
