//! Simulation manager.
//!
//! [`Simulation`] ties a bevy_ecs [`World`] to the [`SystemPipeline`] and is
//! the only surface a driver needs:
//!
//! ```ignore
//! let mut sim = Simulation::new(DEFAULT_DELTA);
//! sim.initialize(Scene::demo()?)?;
//! loop {
//!     sim.tick()?;          // one fixed step
//!     render(sim.scene());  // strictly after the tick
//! }
//! sim.destroy();
//! ```
//!
//! The scene is moved into the world as a resource at initialization, so the
//! simulation owns it exclusively; consumers read it back through
//! [`Simulation::scene`]. Ticks are synchronous and must not overlap; the
//! `&mut self` receiver enforces that.

use bevy_ecs::prelude::*;
use log::{info, warn};
use serde::Serialize;

use crate::components::movementdirection::MovementDirection;
use crate::error::SimError;
use crate::geometry::Point;
use crate::pipeline::{PipelineState, SystemPipeline};
use crate::resources::entityindex::EntityIndex;
use crate::resources::worldtime::WorldTime;
use crate::scene::{Ball, Scene, Wall};
use crate::systems::time::advance_world_time;

/// Per-ball state exposed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallState {
    pub name: String,
    pub center: Point,
    pub radius: f32,
    /// `None` when the ball has no simulated entity, e.g. it was added to the
    /// scene after initialization.
    pub direction: Option<Point>,
}

/// What an information overlay needs after a tick: counts and positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub tick: u64,
    pub elapsed: f32,
    pub wall_count: usize,
    pub ball_count: usize,
    pub balls: Vec<BallState>,
}

pub struct Simulation {
    world: Option<World>,
    pipeline: SystemPipeline,
    delta: f32,
}

impl Simulation {
    /// Creates an unstarted simulation stepping `delta` seconds per tick.
    pub fn new(delta: f32) -> Self {
        Self {
            world: Some(World::new()),
            pipeline: SystemPipeline::new(),
            delta,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.pipeline.state()
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Binds the scene and clock, then runs the init systems once.
    ///
    /// Fails with [`SimError::InvalidDelta`] unless the tick delta is finite
    /// and positive.
    pub fn initialize(&mut self, scene: Scene) -> Result<(), SimError> {
        match self.pipeline.state() {
            PipelineState::Unstarted => {}
            PipelineState::Destroyed => {
                warn!("initialize called after destroy");
                return Err(SimError::NotRunning(PipelineState::Destroyed.name()));
            }
            _ => {
                warn!("initialize called twice");
                return Err(SimError::AlreadyInitialized);
            }
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(SimError::InvalidDelta(self.delta));
        }
        let world = self
            .world
            .as_mut()
            .ok_or(SimError::NotRunning(PipelineState::Destroyed.name()))?;

        let walls = scene.count_of::<Wall>();
        let balls = scene.count_of::<Ball>();
        world.insert_resource(scene);
        world.insert_resource(WorldTime::with_delta(self.delta));
        world.insert_resource(EntityIndex::new());

        self.pipeline.initialize(world)?;
        info!("Simulation initialized with {walls} walls and {balls} balls");
        Ok(())
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Fails with [`SimError::NotRunning`] before [`initialize`](Self::initialize)
    /// or after [`destroy`](Self::destroy), without touching any state.
    pub fn tick(&mut self) -> Result<(), SimError> {
        let state = self.pipeline.state();
        let world = match (state, self.world.as_mut()) {
            (PipelineState::Initialized | PipelineState::Running, Some(world)) => world,
            _ => {
                warn!("tick called in state {state}");
                return Err(SimError::NotRunning(state.name()));
            }
        };

        advance_world_time(world);
        self.pipeline.run(world)?;
        world.clear_trackers();
        Ok(())
    }

    /// Releases the world and the systems. Later ticks are refused.
    pub fn destroy(&mut self) {
        if self.world.take().is_some() {
            info!("Simulation destroyed");
        }
        self.pipeline.destroy();
    }

    /// The bound scene, with ball centers as of the last tick.
    pub fn scene(&self) -> Option<&Scene> {
        self.world.as_ref()?.get_resource::<Scene>()
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn entity_index(&self) -> Option<&EntityIndex> {
        self.world.as_ref()?.get_resource::<EntityIndex>()
    }

    pub fn time(&self) -> Option<WorldTime> {
        self.world.as_ref()?.get_resource::<WorldTime>().copied()
    }

    /// Counts and ball positions read from the scene, plus each ball's current
    /// direction from the ECS. `None` once destroyed or before initialization.
    pub fn snapshot(&self) -> Option<SimSnapshot> {
        let world = self.world.as_ref()?;
        let scene = world.get_resource::<Scene>()?;
        let index = world.get_resource::<EntityIndex>()?;
        let time = world.get_resource::<WorldTime>()?;

        let balls = scene
            .objects_of_type::<Ball>()
            .map(|(id, ball)| {
                let direction = index
                    .entity(id)
                    .and_then(|entity| world.get::<MovementDirection>(entity))
                    .map(MovementDirection::as_vec);
                BallState {
                    name: ball.name.clone(),
                    center: ball.center,
                    radius: ball.radius(),
                    direction,
                }
            })
            .collect();

        Some(SimSnapshot {
            tick: time.tick_count,
            elapsed: time.elapsed,
            wall_count: scene.count_of::<Wall>(),
            ball_count: scene.count_of::<Ball>(),
            balls,
        })
    }
}
