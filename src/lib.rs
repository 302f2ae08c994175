//! Ball-and-wall simulation library.
//!
//! Circular balls move through a set of static line-segment walls. Each tick
//! the nearest wall contact is resolved by reflecting the ball's direction
//! about the contact normal.
//!
//! The simulation is an ECS built on `bevy_ecs`: scene objects are projected
//! into entities once, a fixed pipeline of systems advances them every tick,
//! and ball positions are written back into the [`scene::Scene`] for
//! renderers to read.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (wall/ball geometry, direction, back-reference)
//! - [`config`] – INI-backed driver configuration
//! - [`geometry`] – points, segments, circle-vs-segment contact, reflection
//! - [`pipeline`] – ordered init and per-tick schedules
//! - [`resources`] – ECS resources (clock, entity index)
//! - [`scene`] – domain objects and JSON scene descriptions
//! - [`simulation`] – the manager a driver talks to
//! - [`store`] – component store contract over the ECS world
//! - [`systems`] – ECS systems

pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod resources;
pub mod scene;
pub mod simulation;
pub mod store;
pub mod systems;
