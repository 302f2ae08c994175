//! One-shot initialization systems.
//!
//! [`wall_init_system`] and [`ball_init_system`] project the scene's walls and
//! balls into the ECS, one entity per object, and record each projection in
//! the [`EntityIndex`]. They run exactly once, in that order, when the
//! simulation is initialized. Running them again would duplicate entities.
//!
//! Both are exclusive systems: they read the [`Scene`] resource and then
//! build entities through [`ComponentStore::get_or_attach`], relying on its
//! auto-create policy.

use bevy_ecs::prelude::*;
use log::{error, info, warn};

use crate::components::ballgeometry::BallGeometry;
use crate::components::movementdirection::MovementDirection;
use crate::components::sceneobjectref::SceneObjectRef;
use crate::components::wallgeometry::WallGeometry;
use crate::error::SimError;
use crate::resources::entityindex::EntityIndex;
use crate::scene::{Ball, Scene, SceneObjectId, Wall};
use crate::store::ComponentStore;

/// Creates one entity per scene [`Wall`] with [`WallGeometry`] and [`SceneObjectRef`].
pub fn wall_init_system(world: &mut World) {
    let Some(scene) = world.get_resource::<Scene>() else {
        warn!("wall_init_system: no Scene resource bound");
        return;
    };
    let walls: Vec<(SceneObjectId, Wall)> = scene
        .objects_of_type::<Wall>()
        .map(|(id, wall)| (id, wall.clone()))
        .collect();

    for (id, wall) in walls {
        let entity = world.create_entity();
        match project_wall(world, entity, id, &wall) {
            Ok(()) => {
                info!(
                    "Created wall entity: {} from ({}, {}) to ({}, {})",
                    wall.name, wall.start.x, wall.start.y, wall.end.x, wall.end.y
                );
                if wall.segment().is_degenerate() {
                    warn!("Wall {} is degenerate and will never collide", wall.name);
                }
            }
            Err(e) => error!("Failed to project wall {}: {}", wall.name, e),
        }
    }
}

/// Creates one entity per scene [`Ball`] with [`BallGeometry`],
/// [`SceneObjectRef`] and an upward [`MovementDirection`].
pub fn ball_init_system(world: &mut World) {
    let Some(scene) = world.get_resource::<Scene>() else {
        warn!("ball_init_system: no Scene resource bound");
        return;
    };
    let balls: Vec<(SceneObjectId, Ball)> = scene
        .objects_of_type::<Ball>()
        .map(|(id, ball)| (id, ball.clone()))
        .collect();

    for (id, ball) in balls {
        let entity = world.create_entity();
        match project_ball(world, entity, id, &ball) {
            Ok(()) => info!(
                "Created ball entity: {} at ({}, {}) with speed {}",
                ball.name, ball.center.x, ball.center.y, ball.speed()
            ),
            Err(e) => error!("Failed to project ball {}: {}", ball.name, e),
        }
    }
}

fn project_wall(
    world: &mut World,
    entity: Entity,
    id: SceneObjectId,
    wall: &Wall,
) -> Result<(), SimError> {
    *world.get_or_attach::<WallGeometry>(entity)? = WallGeometry::new(wall.start, wall.end);
    *world.get_or_attach::<SceneObjectRef>(entity)? = SceneObjectRef::new(id);
    record(world, id, entity);
    Ok(())
}

fn project_ball(
    world: &mut World,
    entity: Entity,
    id: SceneObjectId,
    ball: &Ball,
) -> Result<(), SimError> {
    *world.get_or_attach::<BallGeometry>(entity)? =
        BallGeometry::new(ball.center, ball.radius(), ball.speed());
    *world.get_or_attach::<SceneObjectRef>(entity)? = SceneObjectRef::new(id);
    *world.get_or_attach::<MovementDirection>(entity)? = MovementDirection::new(0.0, 1.0);
    record(world, id, entity);
    Ok(())
}

fn record(world: &mut World, id: SceneObjectId, entity: Entity) {
    let mut index = world.get_resource_or_init::<EntityIndex>();
    if let Some(previous) = index.insert(id, entity) {
        warn!("Scene object {id} was already projected as {previous:?}; rebinding to {entity:?}");
    }
}
