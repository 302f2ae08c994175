//! ECS components for simulated entities.
//!
//! Submodules overview:
//! - [`ballgeometry`] – live center, radius and speed of a ball
//! - [`movementdirection`] – unit direction of travel
//! - [`sceneobjectref`] – back-reference to the originating scene object
//! - [`wallgeometry`] – snapshot of a wall segment

pub mod ballgeometry;
pub mod movementdirection;
pub mod sceneobjectref;
pub mod wallgeometry;
