//! Headless end-to-end checks: the staircase scene is built with the real
//! factories into a bare ECS world, stepped with the real physics adapter,
//! and synchronized with the real frame systems.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use stairfall::config::*;
use stairfall::physics::{ObjectKind, PhysicsWorld, SceneObjects};
use stairfall::scene::factory::{init_sphere, spawn_staircase};
use stairfall::scene::sync::sync_meshes;
use stairfall::ui::panel::ControlPanel;
use stairfall::ui::reset::{ResetHooks, reset_scene, setup_panel};

/// A world with the full startup population (five stairs, one launched
/// sphere, panel wired) but no window or renderer.
fn scene_world() -> World {
    let mut world = World::new();
    world.insert_resource(Assets::<Mesh>::default());
    world.insert_resource(Assets::<StandardMaterial>::default());
    world.init_resource::<PhysicsWorld>();
    world.init_resource::<SceneObjects>();
    world.init_resource::<ControlPanel>();

    let respawn = world.register_system(init_sphere);
    let reset = world.register_system(reset_scene);
    world.insert_resource(ResetHooks { reset, respawn });

    world
        .run_system_once(spawn_staircase)
        .expect("staircase should spawn");
    world
        .run_system_once(setup_panel)
        .expect("panel should wire up");
    world
}

fn census(world: &World) -> (usize, usize) {
    let objects = world.resource::<SceneObjects>();
    (
        objects.count_kind(ObjectKind::Dynamic),
        objects.count_kind(ObjectKind::Static),
    )
}

fn sphere(world: &World) -> stairfall::physics::SceneObject {
    let objects = world.resource::<SceneObjects>();
    let (_, object) = objects
        .iter()
        .find(|(_, object)| object.kind == ObjectKind::Dynamic)
        .expect("one dynamic sphere");
    *object
}

#[test]
fn startup_population_is_one_sphere_on_five_stairs() {
    let mut world = scene_world();
    assert_eq!(census(&world), (1, 5));
    assert_eq!(world.resource::<PhysicsWorld>().body_count(), 6);

    let panel = world.resource::<ControlPanel>();
    assert_eq!(panel.action_count(), 1);
    assert_eq!(panel.slider_count(), 1);

    let ball = sphere(&world);
    let physics = world.resource::<PhysicsWorld>();
    let (position, _) = physics.body_pose(ball.body).expect("sphere body");
    assert_eq!(position, SPHERE_SPAWN);
    let mass = physics.body_mass(ball.body).expect("sphere mass");
    assert!((mass - SPHERE_MASS).abs() < 1e-4);
}

#[test]
fn launched_sphere_falls_forward_down_the_stairs() {
    let mut world = scene_world();
    let ball = sphere(&world);
    let start = world
        .resource::<PhysicsWorld>()
        .body_pose(ball.body)
        .expect("sphere body")
        .0;

    for _ in 0..120 {
        world
            .resource_mut::<PhysicsWorld>()
            .step(FIXED_TIMESTEP, FIXED_TIMESTEP, MAX_SUBSTEPS);
        world.run_system_once(sync_meshes).expect("sync should run");

        // Synchronization invariant: after a completed frame every mesh
        // transform equals its body pose exactly.
        let objects = world.resource::<SceneObjects>();
        let physics = world.resource::<PhysicsWorld>();
        let mut pairs = Vec::new();
        for (_, object) in objects.iter() {
            let pose = physics.body_pose(object.body).expect("body");
            pairs.push((object.mesh, pose));
        }
        for (mesh, (position, rotation)) in pairs {
            let transform = world.entity(mesh).get::<Transform>().expect("transform");
            assert_eq!(transform.translation, position);
            assert_eq!(transform.rotation, rotation);
            assert!(position.is_finite());
        }
    }

    let end = world
        .resource::<PhysicsWorld>()
        .body_pose(ball.body)
        .expect("sphere body")
        .0;
    assert!(end.y < start.y, "sphere did not descend: {end}");
    assert!(end.z > start.z, "sphere did not advance: {end}");
}

#[test]
fn reset_is_structurally_idempotent() {
    let mut world = scene_world();

    for _ in 0..3 {
        let old = sphere(&world);
        world.run_system_once(reset_scene).expect("reset should run");

        assert_eq!(census(&world), (1, 5));
        assert_eq!(world.resource::<PhysicsWorld>().body_count(), 6);

        // Nothing from the previous generation survives anywhere.
        let physics = world.resource::<PhysicsWorld>();
        assert!(!physics.contains(old.body));
        assert!(world.get_entity(old.mesh).is_err());

        // The panel is rebuilt: base reset action plus the fresh mass slider.
        let panel = world.resource::<ControlPanel>();
        assert_eq!(panel.action_count(), 1);
        assert_eq!(panel.slider_count(), 1);

        // The fresh sphere is a new pairing back at the spawn point.
        let fresh = sphere(&world);
        assert_ne!(fresh.body, old.body);
        let position = world
            .resource::<PhysicsWorld>()
            .body_pose(fresh.body)
            .expect("fresh sphere")
            .0;
        assert_eq!(position, SPHERE_SPAWN);
    }
}

#[test]
fn static_stairs_survive_resets_untouched() {
    let mut world = scene_world();

    let stairs: Vec<_> = {
        let objects = world.resource::<SceneObjects>();
        objects
            .iter()
            .filter(|(_, object)| object.kind == ObjectKind::Static)
            .map(|(handle, object)| (handle, *object))
            .collect()
    };
    assert_eq!(stairs.len(), 5);

    world.run_system_once(reset_scene).expect("reset should run");

    let objects = world.resource::<SceneObjects>();
    let physics = world.resource::<PhysicsWorld>();
    for (index, (handle, stair)) in stairs.iter().enumerate() {
        assert!(objects.get(*handle).is_some(), "stair {index} dropped");
        let (position, _) = physics.body_pose(stair.body).expect("stair body");
        assert_eq!(
            position,
            Vec3::new(
                0.0,
                -STAIR_HEIGHT * index as f32,
                STAIR_HEIGHT * index as f32
            )
        );
    }
}
