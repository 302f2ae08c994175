//! System-level tick tests for init, movement, collision, scene sync and time.
//!
//! Each test builds a bare `World`, spawns what it needs, and runs a single
//! system through a one-off `Schedule`.

use bevy_ecs::prelude::*;

use ballsim::components::ballgeometry::BallGeometry;
use ballsim::components::movementdirection::MovementDirection;
use ballsim::components::sceneobjectref::SceneObjectRef;
use ballsim::components::wallgeometry::WallGeometry;
use ballsim::geometry::Point;
use ballsim::resources::entityindex::EntityIndex;
use ballsim::resources::worldtime::WorldTime;
use ballsim::scene::{Ball, Scene, SceneObjectId, Wall};
use ballsim::store::ComponentStore;
use ballsim::systems::collision::collision_system;
use ballsim::systems::init::{ball_init_system, wall_init_system};
use ballsim::systems::movement::movement_system;
use ballsim::systems::scenesync::scene_sync_system;
use ballsim::systems::time::advance_world_time;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn make_world(delta: f32, scene: Scene) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::with_delta(delta));
    world.insert_resource(scene);
    world.insert_resource(EntityIndex::new());
    world
}

fn tick_init(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((wall_init_system, ball_init_system).chain());
    schedule.run(world);
}

fn tick_wall_init(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(wall_init_system);
    schedule.run(world);
}

fn tick_ball_init(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(ball_init_system);
    schedule.run(world);
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement_system);
    schedule.run(world);
}

fn tick_collision(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collision_system);
    schedule.run(world);
}

fn tick_scene_sync(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(scene_sync_system);
    schedule.run(world);
}

fn scene_with_ball(center: Point) -> (Scene, SceneObjectId) {
    let mut scene = Scene::new();
    let id = scene
        .add(Ball::new("Ball", center, 0.05, 0.5).unwrap())
        .unwrap();
    (scene, id)
}

fn spawn_ball(world: &mut World, id: SceneObjectId, center: Point, direction: Point) -> Entity {
    world
        .spawn((
            BallGeometry::new(center, 0.05, 0.5),
            MovementDirection::from_vec(direction),
            SceneObjectRef::new(id),
        ))
        .id()
}

fn spawn_wall(world: &mut World, start: Point, end: Point) -> Entity {
    world
        .spawn((WallGeometry::new(start, end), SceneObjectRef::default()))
        .id()
}

fn scene_center(world: &World, id: SceneObjectId) -> Point {
    world.resource::<Scene>().get_as::<Ball>(id).unwrap().center
}

// ==================== INIT ====================

#[test]
fn init_systems_project_every_wall_and_ball() {
    let scene = Scene::demo().unwrap();
    let mut world = make_world(0.016, scene);
    tick_init(&mut world);

    assert_eq!(world.entities_with::<With<WallGeometry>>().len(), 5);
    assert_eq!(world.entities_with::<With<BallGeometry>>().len(), 1);
    assert_eq!(
        world
            .entities_with::<(With<BallGeometry>, With<MovementDirection>, With<SceneObjectRef>)>()
            .len(),
        1
    );
    assert_eq!(world.resource::<EntityIndex>().len(), 6);
}

#[test]
fn init_walls_do_not_get_a_direction() {
    let scene = Scene::demo().unwrap();
    let mut world = make_world(0.016, scene);
    tick_wall_init(&mut world);

    assert!(world.entities_with::<With<MovementDirection>>().is_empty());
    assert!(world.entities_with::<With<BallGeometry>>().is_empty());
}

#[test]
fn init_without_scene_is_a_no_op() {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    tick_init(&mut world);
    assert!(world.entities_with::<With<SceneObjectRef>>().is_empty());
}

#[test]
fn init_ball_gets_upward_direction_and_back_reference() {
    let (scene, id) = scene_with_ball(Point::new(0.3, 0.4));
    let mut world = make_world(0.016, scene);
    tick_ball_init(&mut world);

    let entity = world.resource::<EntityIndex>().entity(id).unwrap();
    assert_eq!(
        *world.component::<MovementDirection>(entity).unwrap(),
        MovementDirection::new(0.0, 1.0)
    );
    assert_eq!(world.component::<SceneObjectRef>(entity).unwrap().target, Some(id));
    assert_eq!(
        world.component::<BallGeometry>(entity).unwrap().center,
        Point::new(0.3, 0.4)
    );
}

// ==================== MOVEMENT ====================

#[test]
fn movement_advances_along_direction() {
    let start = Point::new(0.5, 0.5);
    let (scene, id) = scene_with_ball(start);
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, start, Point::new(1.0, 0.0));

    tick_movement(&mut world);

    let ball = world.get::<BallGeometry>(entity).unwrap();
    assert!(vec_approx_eq(ball.center, Point::new(0.508, 0.5)));
}

#[test]
fn movement_writes_through_to_scene() {
    let start = Point::new(0.5, 0.5);
    let (scene, id) = scene_with_ball(start);
    let mut world = make_world(0.016, scene);
    spawn_ball(&mut world, id, start, Point::new(0.0, -1.0));

    tick_movement(&mut world);

    assert!(vec_approx_eq(scene_center(&world, id), Point::new(0.5, 0.492)));
}

#[test]
fn movement_skips_entities_without_back_reference() {
    let mut world = make_world(0.016, Scene::new());
    let entity = world
        .spawn((
            BallGeometry::new(Point::new(0.5, 0.5), 0.05, 0.5),
            MovementDirection::default(),
        ))
        .id();

    tick_movement(&mut world);

    assert_eq!(
        world.get::<BallGeometry>(entity).unwrap().center,
        Point::new(0.5, 0.5)
    );
}

#[test]
fn movement_with_zero_speed_stays_put() {
    let start = Point::new(0.5, 0.5);
    let mut scene = Scene::new();
    let id = scene.add(Ball::new("Still", start, 0.05, 0.0).unwrap()).unwrap();
    let mut world = make_world(0.016, scene);
    let entity = world
        .spawn((
            BallGeometry::new(start, 0.05, 0.0),
            MovementDirection::default(),
            SceneObjectRef::new(id),
        ))
        .id();

    for _ in 0..10 {
        tick_movement(&mut world);
    }
    assert_eq!(world.get::<BallGeometry>(entity).unwrap().center, start);
}

// ==================== COLLISION ====================

#[test]
fn collision_without_contact_leaves_ball_alone() {
    let center = Point::new(0.5, 0.5);
    let (scene, id) = scene_with_ball(center);
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, center, Point::new(0.0, 1.0));
    spawn_wall(&mut world, Point::new(0.1, 0.1), Point::new(0.7, 0.1));

    tick_collision(&mut world);

    assert_eq!(world.get::<BallGeometry>(entity).unwrap().center, center);
    assert_eq!(
        *world.get::<MovementDirection>(entity).unwrap(),
        MovementDirection::new(0.0, 1.0)
    );
}

#[test]
fn collision_reflects_and_replays_step_backwards() {
    // Previous position (0.5, 0.752) is 0.048 below the wall.
    let center = Point::new(0.5, 0.76);
    let (scene, id) = scene_with_ball(center);
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, center, Point::new(0.0, 1.0));
    spawn_wall(&mut world, Point::new(0.1, 0.8), Point::new(0.9, 0.8));

    tick_collision(&mut world);

    let dir = world.get::<MovementDirection>(entity).unwrap().as_vec();
    assert!(vec_approx_eq(dir, Point::new(0.0, -1.0)));
    let ball = world.get::<BallGeometry>(entity).unwrap();
    assert!(vec_approx_eq(ball.center, Point::new(0.5, 0.744)));
}

#[test]
fn collision_ignores_walls_without_back_reference() {
    let center = Point::new(0.5, 0.76);
    let (scene, id) = scene_with_ball(center);
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, center, Point::new(0.0, 1.0));
    world.spawn(WallGeometry::new(Point::new(0.1, 0.8), Point::new(0.9, 0.8)));

    tick_collision(&mut world);

    assert_eq!(world.get::<BallGeometry>(entity).unwrap().center, center);
}

#[test]
fn collision_skips_degenerate_wall() {
    let center = Point::new(0.5, 0.5);
    let (scene, id) = scene_with_ball(center);
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, center, Point::new(0.0, 1.0));
    let p = Point::new(0.5, 0.5);
    spawn_wall(&mut world, p, p);

    tick_collision(&mut world);

    assert_eq!(world.get::<BallGeometry>(entity).unwrap().center, center);
    assert_eq!(
        *world.get::<MovementDirection>(entity).unwrap(),
        MovementDirection::new(0.0, 1.0)
    );
}

// ==================== SCENE SYNC ====================

#[test]
fn scene_sync_copies_center_out() {
    let (scene, id) = scene_with_ball(Point::new(0.5, 0.5));
    let mut world = make_world(0.016, scene);
    spawn_ball(&mut world, id, Point::new(0.2, 0.3), Point::new(0.0, 1.0));

    tick_scene_sync(&mut world);

    assert_eq!(scene_center(&world, id), Point::new(0.2, 0.3));
}

#[test]
fn scene_sync_is_idempotent() {
    let (scene, id) = scene_with_ball(Point::new(0.5, 0.5));
    let mut world = make_world(0.016, scene);
    spawn_ball(&mut world, id, Point::new(0.25, 0.75), Point::new(0.0, 1.0));

    tick_scene_sync(&mut world);
    let first = scene_center(&world, id);
    tick_scene_sync(&mut world);
    assert_eq!(scene_center(&world, id), first);
}

#[test]
fn scene_sync_tolerates_removed_objects() {
    let (scene, id) = scene_with_ball(Point::new(0.5, 0.5));
    let mut world = make_world(0.016, scene);
    let entity = spawn_ball(&mut world, id, Point::new(0.2, 0.3), Point::new(0.0, 1.0));
    world.resource_mut::<Scene>().remove(id);

    tick_scene_sync(&mut world);
    tick_movement(&mut world);

    assert!(world.resource::<Scene>().is_empty());
    assert!(world.get::<BallGeometry>(entity).is_some());
}

#[test]
fn scene_sync_ignores_unbound_and_wall_targets() {
    let mut scene = Scene::new();
    let wall_id = scene
        .add(Wall::new("W", Point::ZERO, Point::X).unwrap())
        .unwrap();
    let mut world = make_world(0.016, scene);
    world.spawn((BallGeometry::default(), SceneObjectRef::default()));
    world.spawn((BallGeometry::default(), SceneObjectRef::new(wall_id)));

    tick_scene_sync(&mut world);

    let wall = world.resource::<Scene>().get_as::<Wall>(wall_id).unwrap();
    assert_eq!(wall.start, Point::ZERO);
    assert_eq!(wall.end, Point::X);
}

// ==================== TIME ====================

#[test]
fn world_time_advances_by_fixed_delta() {
    let mut world = make_world(0.25, Scene::new());
    advance_world_time(&mut world);
    advance_world_time(&mut world);

    let time = world.resource::<WorldTime>();
    assert_eq!(time.tick_count, 2);
    assert!(approx_eq(time.elapsed, 0.5));
    assert!(approx_eq(time.delta, 0.25));
}

#[test]
fn world_time_missing_resource_is_ignored() {
    let mut world = World::new();
    advance_world_time(&mut world);
    assert!(world.get_resource::<WorldTime>().is_none());
}
