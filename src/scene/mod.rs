use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;

pub mod camera;
pub mod factory;
pub mod sync;

pub use camera::{OrbitCamera, Viewport};
pub use sync::SimClock;

use crate::config::*;

/// Spawn the perspective camera with its orbit rig.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::looking_from(CAMERA_POSITION, Vec3::ZERO),
    ));
}

/// Ambient fill plus one shadow-casting directional light. Shadow map size
/// and range are fixed configuration.
pub fn setup_lights(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        CascadeShadowConfigBuilder {
            maximum_distance: SHADOW_MAX_DISTANCE,
            ..default()
        }
        .build(),
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Native quit shortcut: Esc or Q.
pub fn exit_on_esc_or_q(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        exit.write(AppExit::Success);
    }
}
