use bevy::prelude::*;

use crate::config::*;
use crate::physics::{PhysicsWorld, SceneObjects};
use crate::scene::factory::PhysicsMesh;

/// Elapsed time at the previous tick; the per-frame delta is derived from it.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SimClock {
    pub last_elapsed: f32,
}

/// Advance the physics world by this frame's measured delta. The world
/// consumes it in fixed increments, so a slow frame costs extra substeps,
/// never a larger timestep.
pub fn step_simulation(
    time: Res<Time>,
    mut clock: ResMut<SimClock>,
    mut physics: ResMut<PhysicsWorld>,
) {
    let elapsed = time.elapsed_secs();
    let delta = elapsed - clock.last_elapsed;
    clock.last_elapsed = elapsed;

    physics.step(FIXED_TIMESTEP, delta, MAX_SUBSTEPS);
}

/// Copy every registered body's pose onto its paired mesh transform. Runs
/// after [`step_simulation`] so the frame renders the state it simulated.
pub fn sync_meshes(
    objects: Res<SceneObjects>,
    physics: Res<PhysicsWorld>,
    mut transforms: Query<&mut Transform, With<PhysicsMesh>>,
) {
    for (_, object) in objects.iter() {
        let Some((position, rotation)) = physics.body_pose(object.body) else {
            warn!(body = ?object.body, "registered object has no body");
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(object.mesh) else {
            warn!(mesh = ?object.mesh, "registered object has no mesh");
            continue;
        };
        transform.translation = position;
        transform.rotation = rotation;
    }
}
