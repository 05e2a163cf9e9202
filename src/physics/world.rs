use bevy::prelude::*;
use rapier3d::prelude::*;
// Disambiguate the glob collision: both bevy's and rapier's preludes export a
// `Real`; the physics adapter means rapier's (f32) throughout.
use rapier3d::prelude::Real;

use crate::config::*;
use crate::error::SceneError;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn na_to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn na_to_quat(q: &rapier3d::na::UnitQuaternion<Real>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

fn to_isometry(translation: Vec3, rotation: Quat) -> Isometry<Real> {
    Isometry::from_parts(
        rapier3d::na::Translation3::new(translation.x, translation.y, translation.z),
        rapier3d::na::UnitQuaternion::from_quaternion(rapier3d::na::Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        )),
    )
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Owns the whole rapier simulation state: gravity, broadphase, solver
/// pipeline, and the body/collider sets. Bodies mutate in place during
/// [`PhysicsWorld::step`]; copying poses onto meshes is the frame loop's job,
/// never this adapter's.
#[derive(Resource)]
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    accumulator: f32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        if let Some(iterations) = std::num::NonZeroUsize::new(SOLVER_ITERATIONS) {
            integration_parameters.num_solver_iterations = iterations;
        }
        Self {
            gravity: vec3_to_na(GRAVITY),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            accumulator: 0.0,
        }
    }
}

impl PhysicsWorld {
    /// Advance the simulation in fixed `fixed_dt` increments. The measured
    /// frame delta only feeds the accumulator; each solver step always runs at
    /// the nominal timestep, and at most `max_substeps` steps are consumed per
    /// call so a long frame cannot stall the loop catching up.
    pub fn step(&mut self, fixed_dt: f32, measured_delta: f32, max_substeps: u32) {
        if !measured_delta.is_finite() || measured_delta < 0.0 {
            warn!(measured_delta, "ignoring bogus frame delta");
            return;
        }
        let cap = fixed_dt * max_substeps as f32;
        self.accumulator = (self.accumulator + measured_delta).min(cap);
        while self.accumulator >= fixed_dt {
            self.accumulator -= fixed_dt;
            self.integration_parameters.dt = fixed_dt;
            self.pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                Some(&mut self.query_pipeline),
                &(),
                &(),
            );
        }
    }

    /// Dynamic ball body with the shared contact material. Mass comes from the
    /// collider so in-place retuning keeps a consistent inertia.
    pub fn add_dynamic_ball(&mut self, radius: f32, position: Vec3, mass: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vec3_to_na(position))
            .can_sleep(ALLOW_SLEEP)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(radius)
            .mass(mass)
            .friction(DEFAULT_FRICTION)
            .restitution(DEFAULT_RESTITUTION)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Fixed (non-integrated) cuboid body, e.g. one stair step.
    pub fn add_fixed_cuboid(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .position(to_isometry(position, rotation))
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(DEFAULT_FRICTION)
            .restitution(DEFAULT_RESTITUTION)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Removing an already-removed handle is
    /// a no-op that reports `false` so callers can flag the desync.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Current position and orientation of a body.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        let body = self.bodies.get(handle)?;
        Some((na_to_vec3(body.translation()), na_to_quat(body.rotation())))
    }

    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.bodies.get(handle).map(|body| na_to_vec3(body.linvel()))
    }

    pub fn body_mass(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|body| body.mass())
    }

    /// Retune a live body's mass in place (and wake it so the new mass takes
    /// effect immediately). Reports `false` for stale handles.
    pub fn set_body_mass(&mut self, handle: RigidBodyHandle, mass: f32) -> bool {
        let Some(body) = self.bodies.get(handle) else {
            return false;
        };
        let Some(&collider) = body.colliders().first() else {
            return false;
        };
        if let Some(collider) = self.colliders.get_mut(collider) {
            collider.set_mass(mass);
        }
        if let Some(body) = self.bodies.get_mut(handle) {
            body.wake_up(true);
        }
        true
    }

    pub fn apply_impulse(
        &mut self,
        handle: RigidBodyHandle,
        impulse: Vec3,
    ) -> Result<(), SceneError> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or(SceneError::UnknownBody(handle))?;
        body.apply_impulse(vec3_to_na(impulse), true);
        Ok(())
    }
}
