use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::config::*;

/// Orbit-style camera rig: yaw/pitch/distance around a focus point, with the
/// smoothed state trailing the input targets for damped motion.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub target_distance: f32,
}

impl OrbitCamera {
    /// Rig equivalent to a camera at `position` looking at `focus`.
    pub fn looking_from(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(f32::EPSILON);
        let yaw = offset.x.atan2(offset.z);
        let pitch = -(offset.y / distance).clamp(-1.0, 1.0).asin();
        Self {
            focus,
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
        }
    }

    /// World pose for the current (smoothed) rig state.
    pub fn pose(&self) -> (Vec3, Quat) {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        let translation = self.focus + rotation * Vec3::new(0.0, 0.0, self.distance);
        (translation, rotation)
    }
}

/// Drag to orbit, wheel to zoom; the rig eases toward the targets with
/// frame-rate independent damping.
pub fn orbit_camera(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    mut rigs: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let mut drag = Vec2::ZERO;
    for event in motion.read() {
        drag += event.delta;
    }
    let mut scroll = 0.0;
    for event in wheel.read() {
        scroll += event.y;
    }

    let Ok((mut rig, mut transform)) = rigs.single_mut() else {
        return;
    };

    if buttons.pressed(MouseButton::Left) {
        rig.target_yaw -= drag.x * ORBIT_SENSITIVITY;
        rig.target_pitch = (rig.target_pitch - drag.y * ORBIT_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }
    if scroll != 0.0 {
        rig.target_distance = (rig.target_distance * ZOOM_SENSITIVITY.powf(scroll))
            .clamp(ORBIT_DISTANCE_MIN, ORBIT_DISTANCE_MAX);
    }

    // Exponential easing toward the targets (frame-rate independent).
    let blend = 1.0 - CAMERA_DAMPING_PER_SECOND.powf(time.delta_secs());
    rig.yaw += (rig.target_yaw - rig.yaw) * blend;
    rig.pitch += (rig.target_pitch - rig.pitch) * blend;
    rig.distance += (rig.target_distance - rig.distance) * blend;

    let (translation, rotation) = rig.pose();
    transform.translation = translation;
    transform.rotation = rotation;
}

/// Window size as last applied to the camera and renderer.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Push a viewport size into a camera projection.
pub fn apply_viewport(viewport: &Viewport, projection: &mut Projection) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = viewport.aspect();
    }
}

/// Consume resize notifications at the start of the frame: update the
/// viewport state and the camera aspect before anything this frame renders,
/// and keep the scale factor bounded.
pub fn handle_window_resize(
    mut resizes: MessageReader<WindowResized>,
    mut viewport: ResMut<Viewport>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<OrbitCamera>>,
) {
    let Some(resized) = resizes.read().last() else {
        return;
    };
    viewport.width = resized.width;
    viewport.height = resized.height;

    for mut projection in &mut projections {
        apply_viewport(&viewport, &mut *projection);
    }

    if let Ok(mut window) = windows.single_mut() {
        if window.resolution.scale_factor() > MAX_PIXEL_RATIO {
            window
                .resolution
                .set_scale_factor_override(Some(MAX_PIXEL_RATIO));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn looking_from_round_trips_the_start_pose() {
        let rig = OrbitCamera::looking_from(CAMERA_POSITION, Vec3::ZERO);
        let (translation, _) = rig.pose();
        assert_relative_eq!(translation.x, CAMERA_POSITION.x, epsilon = 1e-3);
        assert_relative_eq!(translation.y, CAMERA_POSITION.y, epsilon = 1e-3);
        assert_relative_eq!(translation.z, CAMERA_POSITION.z, epsilon = 1e-3);
    }

    #[test]
    fn resize_updates_the_aspect_exactly() {
        let viewport = Viewport {
            width: 800.0,
            height: 600.0,
        };
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        apply_viewport(&viewport, &mut projection);
        let Projection::Perspective(perspective) = projection else {
            panic!("projection changed kind");
        };
        assert_eq!(perspective.aspect_ratio, 800.0 / 600.0);
    }
}
