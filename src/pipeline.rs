//! Fixed, ordered system pipeline.
//!
//! Two schedules, both chained so systems run strictly in registration order:
//!
//! - init (run once): [`wall_init_system`] → [`ball_init_system`]
//! - run (every tick): [`collision_system`] → [`scene_sync_system`] → [`movement_system`]
//!
//! # States
//!
//! ```text
//! Unstarted ──init──► Initialized ──tick──► Running ──┐
//!     │                    │                  ▲  tick │
//!     │                    │                  └───────┘
//!     └────────destroy─────┴──────destroy────────► Destroyed
//! ```
//!
//! `Destroyed` is terminal; the schedules are dropped and further runs are
//! refused.

use std::fmt;

use bevy_ecs::prelude::*;

use crate::error::SimError;
use crate::systems::collision::collision_system;
use crate::systems::init::{ball_init_system, wall_init_system};
use crate::systems::movement::movement_system;
use crate::systems::scenesync::scene_sync_system;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Unstarted,
    Initialized,
    Running,
    Destroyed,
}

impl PipelineState {
    pub fn name(self) -> &'static str {
        match self {
            PipelineState::Unstarted => "unstarted",
            PipelineState::Initialized => "initialized",
            PipelineState::Running => "running",
            PipelineState::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct SystemPipeline {
    init: Schedule,
    run: Schedule,
    state: PipelineState,
}

impl Default for SystemPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPipeline {
    pub fn new() -> Self {
        let mut init = Schedule::default();
        init.add_systems((wall_init_system, ball_init_system).chain());

        let mut run = Schedule::default();
        run.add_systems((collision_system, scene_sync_system, movement_system).chain());

        Self {
            init,
            run,
            state: PipelineState::Unstarted,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs every init system once. The world must already hold the
    /// dependency resources (scene, clock, entity index).
    pub fn initialize(&mut self, world: &mut World) -> Result<(), SimError> {
        match self.state {
            PipelineState::Unstarted => {}
            PipelineState::Destroyed => return Err(SimError::NotRunning(self.state.name())),
            _ => return Err(SimError::AlreadyInitialized),
        }
        self.init.run(world);
        self.state = PipelineState::Initialized;
        Ok(())
    }

    /// Runs every per-tick system once, in order.
    pub fn run(&mut self, world: &mut World) -> Result<(), SimError> {
        match self.state {
            PipelineState::Initialized | PipelineState::Running => {}
            state => return Err(SimError::NotRunning(state.name())),
        }
        self.run.run(world);
        self.state = PipelineState::Running;
        Ok(())
    }

    /// Drops both schedules. Idempotent.
    pub fn destroy(&mut self) {
        self.init = Schedule::default();
        self.run = Schedule::default();
        self.state = PipelineState::Destroyed;
    }
}
