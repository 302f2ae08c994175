//! Bidirectional entity <-> scene object lookup.
//!
//! Filled by the init systems as they project scene objects into the ECS. It
//! answers "which entity simulates this wall/ball" for callers outside the
//! systems, such as snapshots and tests.

use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::scene::SceneObjectId;

#[derive(Resource, Debug, Clone, Default)]
pub struct EntityIndex {
    to_entity: FxHashMap<SceneObjectId, Entity>,
    to_object: FxHashMap<Entity, SceneObjectId>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mapping. Returns the entity previously bound to `id`, if any;
    /// the stale reverse entry is dropped.
    pub fn insert(&mut self, id: SceneObjectId, entity: Entity) -> Option<Entity> {
        let previous = self.to_entity.insert(id, entity);
        if let Some(old) = previous {
            self.to_object.remove(&old);
        }
        self.to_object.insert(entity, id);
        previous
    }

    pub fn entity(&self, id: SceneObjectId) -> Option<Entity> {
        self.to_entity.get(&id).copied()
    }

    pub fn object(&self, entity: Entity) -> Option<SceneObjectId> {
        self.to_object.get(&entity).copied()
    }

    pub fn len(&self) -> usize {
        self.to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_entity.is_empty()
    }
}
