//! Simulation systems.
//!
//! Submodules overview
//! - [`collision`] – resolve the nearest ball-vs-wall contact and reflect
//! - [`init`] – one-shot projection of scene walls and balls into the ECS
//! - [`movement`] – advance balls along their direction for one tick
//! - [`scenesync`] – write ball centers back into the scene
//! - [`time`] – advance the fixed-step simulation clock
//!
//! The per-tick order is fixed by
//! [`SystemPipeline`](crate::pipeline::SystemPipeline): collision, scene sync,
//! movement.

pub mod collision;
pub mod init;
pub mod movement;
pub mod scenesync;
pub mod time;
