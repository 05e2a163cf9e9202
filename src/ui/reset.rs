use bevy::ecs::system::SystemId;
use bevy::prelude::*;

use crate::physics::{ObjectKind, PhysicsWorld, SceneObjects, unregister_where};
use crate::ui::panel::ControlPanel;

/// The two one-shot systems the reset path dispatches: the reset itself (so
/// the base Reset control can be re-registered against it) and the respawn
/// initializer that repopulates the dynamic scene. Both are supplied by the
/// application when the plugin is built; the controller never hard-codes what
/// a fresh scene contains.
#[derive(Resource, Clone, Copy)]
pub struct ResetHooks {
    pub reset: SystemId,
    pub respawn: SystemId,
}

/// Tear down every dynamic object and rebuild the startup population:
/// discard all panel controls, cascade removal of dynamic bodies and meshes
/// through both adapters, re-register the base Reset action, then invoke the
/// respawn initializer.
pub fn reset_scene(
    mut commands: Commands,
    mut panel: ResMut<ControlPanel>,
    mut objects: ResMut<SceneObjects>,
    mut physics: ResMut<PhysicsWorld>,
    hooks: Res<ResetHooks>,
) {
    info!("resetting dynamic scene objects");
    panel.discard_all();
    unregister_where(&mut objects, &mut physics, &mut commands, |object| {
        object.kind == ObjectKind::Dynamic
    });
    panel.register_action("Reset", hooks.reset);
    commands.run_system(hooks.respawn);
}

/// Startup wiring: the base Reset control, then the initial dynamic
/// population via the same initializer a reset uses.
pub fn setup_panel(
    mut commands: Commands,
    mut panel: ResMut<ControlPanel>,
    hooks: Res<ResetHooks>,
) {
    panel.register_action("Reset", hooks.reset);
    commands.run_system(hooks.respawn);
}

/// Keyboard alternative to the panel button.
pub fn reset_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    hooks: Res<ResetHooks>,
    mut commands: Commands,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        commands.run_system(hooks.reset);
    }
}
