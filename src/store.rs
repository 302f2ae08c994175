//! Component store access.
//!
//! The bevy_ecs [`World`] is the component store: a sparse table from
//! [`Entity`] to typed components. [`ComponentStore`] names the small contract
//! the simulation relies on on top of it.
//!
//! # Missing components
//!
//! Two policies coexist:
//! - [`ComponentStore::get_or_attach`] auto-creates a `T::default()` when the
//!   entity lacks `T`. The init systems use it for write-then-read setup.
//! - [`ComponentStore::component`] is strict and fails with
//!   [`SimError::MissingComponent`].
//!
//! # Filters
//!
//! A filter is a bevy [`QueryFilter`] such as
//! `(With<BallGeometry>, With<MovementDirection>)`. Systems use it through
//! `Query`; [`ComponentStore::entities_with`] evaluates it against the current
//! world state on each call. Order is unspecified but stable while no entity
//! is spawned.
//!
//! Entities are never despawned by the simulation, so ids handed out by
//! [`ComponentStore::create_entity`] are never reused while the world lives.

use std::any::type_name;

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;

use crate::error::SimError;

pub trait ComponentStore {
    /// Creates an entity with no components.
    fn create_entity(&mut self) -> Entity;

    /// Mutable access to `T` on `entity`, attaching `T::default()` first if absent.
    fn get_or_attach<T>(&mut self, entity: Entity) -> Result<Mut<'_, T>, SimError>
    where
        T: Component<Mutability = Mutable> + Default;

    /// Read access to `T`, failing if the entity does not own one.
    fn component<T: Component>(&self, entity: Entity) -> Result<&T, SimError>;

    /// Entities matching the filter `F`.
    fn entities_with<F: QueryFilter>(&mut self) -> Vec<Entity>;
}

impl ComponentStore for World {
    fn create_entity(&mut self) -> Entity {
        self.spawn_empty().id()
    }

    fn get_or_attach<T>(&mut self, entity: Entity) -> Result<Mut<'_, T>, SimError>
    where
        T: Component<Mutability = Mutable> + Default,
    {
        let mut entity_mut = self
            .get_entity_mut(entity)
            .map_err(|_| SimError::MissingEntity(entity))?;
        if !entity_mut.contains::<T>() {
            entity_mut.insert(T::default());
        }
        entity_mut
            .into_mut::<T>()
            .ok_or(SimError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    fn component<T: Component>(&self, entity: Entity) -> Result<&T, SimError> {
        if self.get_entity(entity).is_err() {
            return Err(SimError::MissingEntity(entity));
        }
        self.get::<T>(entity).ok_or(SimError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })
    }

    fn entities_with<F: QueryFilter>(&mut self) -> Vec<Entity> {
        let mut state = self.query_filtered::<Entity, F>();
        state.iter(self).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ballgeometry::BallGeometry;
    use crate::components::movementdirection::MovementDirection;
    use crate::components::wallgeometry::WallGeometry;
    use crate::geometry::Point;

    #[test]
    fn test_create_entity_yields_distinct_ids() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_or_attach_creates_default() {
        let mut world = World::new();
        let e = world.create_entity();
        let dir = world.get_or_attach::<MovementDirection>(e).unwrap();
        assert_eq!(*dir, MovementDirection::default());
    }

    #[test]
    fn test_get_or_attach_returns_existing() {
        let mut world = World::new();
        let e = world.create_entity();
        world.get_or_attach::<BallGeometry>(e).unwrap().radius = 0.25;
        let ball = world.get_or_attach::<BallGeometry>(e).unwrap();
        assert_eq!(ball.radius, 0.25);
    }

    #[test]
    fn test_component_is_strict() {
        let mut world = World::new();
        let e = world.create_entity();
        assert!(matches!(
            world.component::<WallGeometry>(e),
            Err(SimError::MissingComponent { .. })
        ));
        world.get_or_attach::<WallGeometry>(e).unwrap().end = Point::new(1.0, 0.0);
        assert_eq!(
            world.component::<WallGeometry>(e).unwrap().end,
            Point::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_missing_entity_errors() {
        let mut world = World::new();
        let e = world.create_entity();
        world.despawn(e);
        assert!(matches!(
            world.get_or_attach::<WallGeometry>(e),
            Err(SimError::MissingEntity(_))
        ));
        assert!(matches!(
            world.component::<WallGeometry>(e),
            Err(SimError::MissingEntity(_))
        ));
    }

    #[test]
    fn test_entities_with_intersects_component_sets() {
        let mut world = World::new();
        let wall = world.create_entity();
        world.get_or_attach::<WallGeometry>(wall).unwrap();
        let ball = world.create_entity();
        world.get_or_attach::<BallGeometry>(ball).unwrap();
        world.get_or_attach::<MovementDirection>(ball).unwrap();
        let still = world.create_entity();
        world.get_or_attach::<BallGeometry>(still).unwrap();

        let moving = world.entities_with::<(With<BallGeometry>, With<MovementDirection>)>();
        assert_eq!(moving, vec![ball]);

        let mut balls = world.entities_with::<With<BallGeometry>>();
        balls.sort();
        let mut expected = vec![ball, still];
        expected.sort();
        assert_eq!(balls, expected);

        assert_eq!(world.entities_with::<With<WallGeometry>>(), vec![wall]);
    }
}
