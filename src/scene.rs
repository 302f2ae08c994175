//! Scene object model.
//!
//! The [`Scene`] is the domain-level view of the world: named walls and balls
//! that exist independently of the ECS. It is the source of truth when the
//! simulation starts, and afterwards the systems write ball positions back into
//! it so renderers and other consumers can read current state without touching
//! the ECS.
//!
//! Objects are stored as a tagged [`SceneObject`] enum and addressed by a stable
//! [`SceneObjectId`]. Typed access goes through the [`SceneObjectKind`] trait:
//!
//! ```ignore
//! for (id, wall) in scene.objects_of_type::<Wall>() {
//!     println!("{id}: {} from {} to {}", wall.name, wall.start, wall.end);
//! }
//! ```
//!
//! Scenes can also be described in JSON and loaded with
//! [`SceneDescription::load_from_file`]:
//!
//! ```json
//! {
//!   "walls": [{ "name": "TopWall", "start": [0.1, 0.1], "end": [0.7, 0.1] }],
//!   "balls": [{ "name": "Ball", "center": [0.5, 0.7], "radius": 0.05, "speed": 0.5 }]
//! }
//! ```

use std::fmt;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::geometry::{Point, Segment};

/// Stable handle of an object inside a [`Scene`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneObjectId(u64);

impl SceneObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SceneObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Static line-segment obstacle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    pub name: String,
    pub start: Point,
    pub end: Point,
}

impl Wall {
    /// Creates a wall, rejecting non-finite endpoints. A zero-length wall is
    /// accepted; it just never collides.
    pub fn new(name: impl Into<String>, start: Point, end: Point) -> Result<Self, SimError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SimError::EmptyName);
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(SimError::NonFiniteWall { name });
        }
        Ok(Self { name, start, end })
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }
}

/// Moving circle.
///
/// `radius` and `speed` are only reachable through validating accessors, so a
/// ball borrowed mutably from the scene cannot be given values [`Ball::new`]
/// would refuse. `center` is written by the simulation every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    pub name: String,
    pub center: Point,
    radius: f32,
    speed: f32,
}

impl Ball {
    /// Creates a ball, rejecting a non-positive radius or a negative speed.
    pub fn new(
        name: impl Into<String>,
        center: Point,
        radius: f32,
        speed: f32,
    ) -> Result<Self, SimError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SimError::EmptyName);
        }
        if !valid_parameters(radius, speed) || !center.is_finite() {
            return Err(SimError::InvalidBallParameters {
                name,
                radius,
                speed,
            });
        }
        Ok(Self {
            name,
            center,
            radius,
            speed,
        })
    }

    /// Always `> 0`.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Scalar magnitude in units per second, always `>= 0`.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<(), SimError> {
        self.check(radius, self.speed)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), SimError> {
        self.check(self.radius, speed)?;
        self.speed = speed;
        Ok(())
    }

    fn check(&self, radius: f32, speed: f32) -> Result<(), SimError> {
        if valid_parameters(radius, speed) {
            Ok(())
        } else {
            Err(SimError::InvalidBallParameters {
                name: self.name.clone(),
                radius,
                speed,
            })
        }
    }
}

fn valid_parameters(radius: f32, speed: f32) -> bool {
    radius.is_finite() && radius > 0.0 && speed.is_finite() && speed >= 0.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SceneObject {
    Wall(Wall),
    Ball(Ball),
}

impl SceneObject {
    pub fn name(&self) -> &str {
        match self {
            SceneObject::Wall(wall) => &wall.name,
            SceneObject::Ball(ball) => &ball.name,
        }
    }
}

impl From<Wall> for SceneObject {
    fn from(wall: Wall) -> Self {
        SceneObject::Wall(wall)
    }
}

impl From<Ball> for SceneObject {
    fn from(ball: Ball) -> Self {
        SceneObject::Ball(ball)
    }
}

/// Concrete scene object types that can be picked out of a [`SceneObject`].
pub trait SceneObjectKind: Sized {
    fn from_object(object: &SceneObject) -> Option<&Self>;
    fn from_object_mut(object: &mut SceneObject) -> Option<&mut Self>;
}

impl SceneObjectKind for Wall {
    fn from_object(object: &SceneObject) -> Option<&Self> {
        match object {
            SceneObject::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    fn from_object_mut(object: &mut SceneObject) -> Option<&mut Self> {
        match object {
            SceneObject::Wall(wall) => Some(wall),
            _ => None,
        }
    }
}

impl SceneObjectKind for Ball {
    fn from_object(object: &SceneObject) -> Option<&Self> {
        match object {
            SceneObject::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    fn from_object_mut(object: &mut SceneObject) -> Option<&mut Self> {
        match object {
            SceneObject::Ball(ball) => Some(ball),
            _ => None,
        }
    }
}

/// Insertion-ordered collection of uniquely named scene objects.
///
/// Once handed to [`Simulation::initialize`](crate::simulation::Simulation::initialize)
/// the scene lives in the ECS world as a resource and is exclusively owned
/// there. Objects added after initialization are never projected into the ECS.
#[derive(Resource, Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<(SceneObjectId, SceneObject)>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its handle.
    ///
    /// Fails with [`SimError::DuplicateName`] if an object with the same name
    /// is already present.
    pub fn add(&mut self, object: impl Into<SceneObject>) -> Result<SceneObjectId, SimError> {
        let object = object.into();
        if self.find_by_name(object.name()).is_some() {
            return Err(SimError::DuplicateName(object.name().to_string()));
        }
        let id = SceneObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        Ok(id)
    }

    /// Removes an object, keeping the order of the others.
    pub fn remove(&mut self, id: SceneObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|(oid, _)| *oid == id)?;
        Some(self.objects.remove(index).1)
    }

    pub fn get(&self, id: SceneObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    pub fn get_mut(&mut self, id: SceneObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, object)| object)
    }

    /// Typed lookup; `None` if the id is unknown or refers to another kind.
    pub fn get_as<T: SceneObjectKind>(&self, id: SceneObjectId) -> Option<&T> {
        self.get(id).and_then(T::from_object)
    }

    pub fn get_as_mut<T: SceneObjectKind>(&mut self, id: SceneObjectId) -> Option<&mut T> {
        self.get_mut(id).and_then(T::from_object_mut)
    }

    pub fn find_by_name(&self, name: &str) -> Option<SceneObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name() == name)
            .map(|(id, _)| *id)
    }

    /// All objects of type `T`, in insertion order.
    pub fn objects_of_type<'a, T: SceneObjectKind + 'a>(
        &'a self,
    ) -> impl Iterator<Item = (SceneObjectId, &'a T)> + 'a {
        self.objects
            .iter()
            .filter_map(|(id, object)| T::from_object(object).map(|typed| (*id, typed)))
    }

    pub fn all_objects(&self) -> impl Iterator<Item = (SceneObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn count_of<T: SceneObjectKind>(&self) -> usize {
        self.objects_of_type::<T>().count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Reference layout: four walls forming a quadrilateral, one diagonal and
    /// a single ball.
    pub fn demo() -> Result<Self, SimError> {
        let p1 = Point::new(0.1, 0.1);
        let p2 = Point::new(0.7, 0.1);
        let p3 = Point::new(0.1, 0.7);
        let p4 = Point::new(0.9, 0.9);
        let p5 = Point::new(0.3, 0.3);
        let p6 = Point::new(0.7, 0.7);

        let mut scene = Scene::new();
        scene.add(Wall::new("TopWall", p1, p2)?)?;
        scene.add(Wall::new("LeftWall", p1, p3)?)?;
        scene.add(Wall::new("BottomWall", p3, p4)?)?;
        scene.add(Wall::new("RightWall", p2, p4)?)?;
        scene.add(Wall::new("Diagonal1", p5, p6)?)?;
        scene.add(Ball::new("Ball", Point::new(0.5, 0.7), 0.05, 0.5)?)?;
        Ok(scene)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WallDescription {
    pub name: String,
    pub start: Point,
    pub end: Point,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BallDescription {
    pub name: String,
    pub center: Point,
    pub radius: f32,
    pub speed: f32,
}

/// Serializable description of a scene's initial content.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    #[serde(default)]
    pub walls: Vec<WallDescription>,
    #[serde(default)]
    pub balls: Vec<BallDescription>,
}

impl SceneDescription {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SimError::SceneIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Captures the current content of `scene`.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            walls: scene
                .objects_of_type::<Wall>()
                .map(|(_, wall)| WallDescription {
                    name: wall.name.clone(),
                    start: wall.start,
                    end: wall.end,
                })
                .collect(),
            balls: scene
                .objects_of_type::<Ball>()
                .map(|(_, ball)| BallDescription {
                    name: ball.name.clone(),
                    center: ball.center,
                    radius: ball.radius(),
                    speed: ball.speed(),
                })
                .collect(),
        }
    }

    /// Builds a scene, walls first, validating every object.
    pub fn into_scene(self) -> Result<Scene, SimError> {
        let mut scene = Scene::new();
        for wall in self.walls {
            scene.add(Wall::new(wall.name, wall.start, wall.end)?)?;
        }
        for ball in self.balls {
            scene.add(Ball::new(ball.name, ball.center, ball.radius, ball.speed)?)?;
        }
        Ok(scene)
    }
}
