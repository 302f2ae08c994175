//! ECS resources shared by the simulation systems.
//!
//! Submodules overview:
//! - [`entityindex`] – bidirectional entity <-> scene object map
//! - [`worldtime`] – fixed tick delta and elapsed simulated time
//!
//! The [`Scene`](crate::scene::Scene) itself is also stored as a resource once
//! the simulation is initialized.

pub mod entityindex;
pub mod worldtime;
