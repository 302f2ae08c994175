//! Crate error type.
//!
//! Geometry degeneracies are handled locally by the systems (the offending wall
//! is skipped) and never abort a tick. Parameter problems surface when the scene
//! is built, so a running simulation only ever sees validated objects.

use std::path::PathBuf;

use bevy_ecs::entity::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Strict component read against an entity that lacks the component.
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
    #[error("entity {0:?} does not exist")]
    MissingEntity(Entity),
    /// Wall segment shorter than [`GEOMETRY_EPSILON`](crate::geometry::GEOMETRY_EPSILON).
    #[error("segment length {length} is below the geometry epsilon")]
    DegenerateGeometry { length: f32 },
    #[error("invalid parameters for ball '{name}': radius={radius}, speed={speed}")]
    InvalidBallParameters {
        name: String,
        radius: f32,
        speed: f32,
    },
    #[error("wall '{name}' has a non-finite endpoint")]
    NonFiniteWall { name: String },
    #[error("scene objects need a non-empty name")]
    EmptyName,
    #[error("a scene object named '{0}' already exists")]
    DuplicateName(String),
    #[error("simulation is not running (state: {0})")]
    NotRunning(&'static str),
    #[error("simulation was already initialized")]
    AlreadyInitialized,
    #[error("tick delta must be finite and positive, got {0}")]
    InvalidDelta(f32),
    #[error("config error: {0}")]
    Config(String),
    #[error("scene file {}: {source}", path.display())]
    SceneIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
