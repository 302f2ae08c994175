//! Ball movement.
//!
//! Advances every ball along its [`MovementDirection`] by `speed * delta`,
//! using the fixed delta from [`WorldTime`]. Each ball is updated on its own;
//! there is no interaction between entities here.
//!
//! The new center is also written through to the ball's scene object so the
//! scene reflects the state at the end of the tick, even though
//! [`scene_sync_system`](super::scenesync::scene_sync_system) runs earlier in
//! the pipeline.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::ballgeometry::BallGeometry;
use crate::components::movementdirection::MovementDirection;
use crate::components::sceneobjectref::SceneObjectRef;
use crate::resources::worldtime::WorldTime;
use crate::scene::Scene;
use crate::systems::scenesync::write_back;

pub fn movement_system(
    mut query: Query<(&mut BallGeometry, &MovementDirection, &SceneObjectRef)>,
    time: Res<WorldTime>,
    mut scene: ResMut<Scene>,
) {
    for (mut ball, direction, object_ref) in query.iter_mut() {
        let delta = ball.step(direction.as_vec(), time.delta);
        ball.center += delta;

        if let Some(target) = object_ref.target {
            write_back(&mut scene, target, ball.center);
        }
        trace!(
            "Moved ball {:?} to ({:.3}, {:.3})",
            object_ref.target, ball.center.x, ball.center.y
        );
    }
}
