//! Back-reference from an entity to the scene object it was projected from.
//!
//! Stores a [`SceneObjectId`] rather than a pointer into the scene. Resolving
//! it is a lookup in the [`Scene`](crate::scene::Scene) resource, so a removed
//! object simply resolves to nothing.

use bevy_ecs::prelude::Component;

use crate::scene::SceneObjectId;

/// `target` is `None` until an init system binds the entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneObjectRef {
    pub target: Option<SceneObjectId>,
}

impl SceneObjectRef {
    pub fn new(target: SceneObjectId) -> Self {
        Self {
            target: Some(target),
        }
    }
}
