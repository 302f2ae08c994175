//! Time update.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick by its fixed delta.

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Add one fixed `delta` to `elapsed` and bump the tick counter.
///
/// Wall-clock time is not consulted: a late driver does not make the next
/// tick longer.
pub fn advance_world_time(world: &mut World) {
    let Some(mut wt) = world.get_resource_mut::<WorldTime>() else {
        log::warn!("advance_world_time: no WorldTime resource");
        return;
    };
    wt.elapsed += wt.delta;
    wt.tick_count += 1;
}
