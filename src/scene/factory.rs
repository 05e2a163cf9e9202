use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::config::*;
use crate::error::SceneError;
use crate::physics::{ObjectHandle, ObjectKind, PhysicsWorld, SceneObject, SceneObjects};
use crate::ui::panel::{ControlPanel, ControlTarget};

/// Marker for meshes paired with a rigid body.
#[derive(Component)]
pub struct PhysicsMesh;

fn validate_extent(value: f32) -> Result<f32, SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SceneError::InvalidExtent(value))
    }
}

fn validate_position(position: Vec3) -> Result<Vec3, SceneError> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(SceneError::NonFinitePosition(position))
    }
}

/// Build a dynamic sphere: a shaded UV-sphere mesh and a ball body of the
/// default mass, placed at `position` and registered as one object.
pub fn create_sphere(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    physics: &mut PhysicsWorld,
    objects: &mut SceneObjects,
    radius: f32,
    position: Vec3,
) -> Result<ObjectHandle, SceneError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SceneError::InvalidRadius(radius));
    }
    let position = validate_position(position)?;

    let mesh = meshes.add(Sphere::new(radius).mesh().uv(20, 20));
    let material = materials.add(StandardMaterial {
        metallic: 0.3,
        perceptual_roughness: 0.4,
        ..default()
    });
    let entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            PhysicsMesh,
        ))
        .id();

    let body = physics.add_dynamic_ball(radius, position, SPHERE_MASS);

    Ok(objects.register(SceneObject {
        kind: ObjectKind::Dynamic,
        body,
        mesh: entity,
    }))
}

/// One stair step: width along X, tread depth along the rotated height axis.
pub struct StairSpec {
    pub width: f32,
    pub height: f32,
    pub position: Vec3,
}

impl StairSpec {
    /// Collider half-extents matching the visual plane, with a thin third
    /// axis so the box hugs the tread.
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width * 0.5, self.height * 0.5, STAIR_HALF_THICKNESS)
    }
}

/// The one rotation that turns an XY-plane mesh (and its matching thin box)
/// horizontal. Derived once and applied to both representations, so the
/// visual tread and the contact surface cannot drift apart.
pub fn stair_orientation() -> Quat {
    Quat::from_rotation_x(-FRAC_PI_2)
}

/// Placement of stair `index` in the descending staircase: each step drops by
/// the stair height in Y and advances by the same amount in Z.
pub fn stair_position(index: u32) -> Vec3 {
    Vec3::new(
        0.0,
        -STAIR_HEIGHT * index as f32,
        STAIR_HEIGHT * index as f32,
    )
}

/// Build one static stair: a horizontal plane mesh and a fixed thin-box body
/// sharing the same placement and orientation.
pub fn create_stair(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    physics: &mut PhysicsWorld,
    objects: &mut SceneObjects,
    spec: StairSpec,
) -> Result<ObjectHandle, SceneError> {
    let width = validate_extent(spec.width)?;
    let height = validate_extent(spec.height)?;
    let position = validate_position(spec.position)?;

    let orientation = stair_orientation();

    let mesh = meshes.add(Plane3d::new(Vec3::Z, Vec2::new(width, height) * 0.5));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x77, 0x77, 0x77),
        metallic: 0.3,
        perceptual_roughness: 0.4,
        ..default()
    });
    let entity = commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_rotation(orientation),
            NotShadowCaster,
            PhysicsMesh,
        ))
        .id();

    let body = physics.add_fixed_cuboid(spec.half_extents(), position, orientation);

    Ok(objects.register(SceneObject {
        kind: ObjectKind::Static,
        body,
        mesh: entity,
    }))
}

/// Startup system: the five-step descending staircase.
pub fn spawn_staircase(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<PhysicsWorld>,
    mut objects: ResMut<SceneObjects>,
) {
    for index in 0..STAIR_COUNT {
        let spec = StairSpec {
            width: STAIR_WIDTH,
            height: STAIR_HEIGHT,
            position: stair_position(index),
        };
        if let Err(error) = create_stair(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut physics,
            &mut objects,
            spec,
        ) {
            error!(%error, index, "failed to spawn stair");
        }
    }
    info!(steps = STAIR_COUNT, "staircase ready");
}

/// The respawn initializer: spawn the launched sphere and bind its mass to
/// the control panel. Runs at startup and again after every reset.
pub fn init_sphere(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<PhysicsWorld>,
    mut objects: ResMut<SceneObjects>,
    mut panel: ResMut<ControlPanel>,
) {
    let handle = match create_sphere(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut physics,
        &mut objects,
        SPHERE_RADIUS,
        SPHERE_SPAWN,
    ) {
        Ok(handle) => handle,
        Err(error) => {
            error!(%error, "failed to spawn sphere");
            return;
        }
    };

    let Some(&SceneObject { body, .. }) = objects.get(handle) else {
        return;
    };
    if let Err(error) = physics.apply_impulse(body, LAUNCH_IMPULSE) {
        error!(%error, "failed to launch sphere");
    }
    panel.register_control(
        "Sphere mass",
        ControlTarget::BodyMass(body),
        SPHERE_MASS_MIN,
        SPHERE_MASS_MAX,
        SPHERE_MASS_STEP,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staircase_layout_descends_by_height() {
        for index in 0..STAIR_COUNT {
            let position = stair_position(index);
            assert_eq!(
                position,
                Vec3::new(0.0, -2.5 * index as f32, 2.5 * index as f32)
            );
        }
    }

    #[test]
    fn stair_collider_matches_the_visual_plane() {
        let spec = StairSpec {
            width: STAIR_WIDTH,
            height: STAIR_HEIGHT,
            position: Vec3::ZERO,
        };
        assert_eq!(spec.half_extents(), Vec3::new(5.0, 1.25, 0.1));
    }

    #[test]
    fn mesh_and_collider_share_one_orientation() {
        // An XY plane's +Z normal must come out pointing up for both
        // representations.
        let up = stair_orientation() * Vec3::Z;
        assert!((up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn degenerate_shapes_are_rejected() {
        assert!(matches!(
            validate_extent(-1.0),
            Err(SceneError::InvalidExtent(_))
        ));
        assert!(matches!(
            validate_extent(f32::NAN),
            Err(SceneError::InvalidExtent(_))
        ));
        assert!(matches!(
            validate_position(Vec3::new(0.0, f32::INFINITY, 0.0)),
            Err(SceneError::NonFinitePosition(_))
        ));
    }
}
