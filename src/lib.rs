//! Stairfall - a staircase and a launched sphere driven by a rigid-body
//! simulation, with meshes synchronized to bodies every frame and a debug
//! panel that can reset the dynamic scene.
//!
//! # Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use stairfall::StairfallPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(StairfallPlugin)
//!         .run();
//! }
//! ```

use bevy::pbr::DirectionalLightShadowMap;
use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

pub mod config;
pub mod error;
pub mod physics;
pub mod scene;
pub mod ui;

use physics::{PhysicsWorld, SceneObjects};
use scene::camera::Viewport;
use scene::sync::SimClock;
use ui::panel::ControlPanel;
use ui::reset::ResetHooks;

/// Plug this into your App with `.add_plugins(StairfallPlugin)`.
pub struct StairfallPlugin;

impl Plugin for StairfallPlugin {
    fn build(&self, app: &mut App) {
        // The reset path dispatches these as one-shot systems; registering
        // them here makes "what a fresh scene contains" plugin
        // configuration rather than controller internals.
        let respawn = app.world_mut().register_system(scene::factory::init_sphere);
        let reset = app.world_mut().register_system(ui::reset::reset_scene);

        app.add_plugins(EguiPlugin::default())
            .insert_resource(DirectionalLightShadowMap {
                size: config::SHADOW_MAP_SIZE,
            })
            .init_resource::<PhysicsWorld>()
            .init_resource::<SceneObjects>()
            .init_resource::<SimClock>()
            .init_resource::<Viewport>()
            .init_resource::<ControlPanel>()
            .insert_resource(ResetHooks { reset, respawn })
            .add_systems(
                Startup,
                (
                    scene::setup_camera,
                    scene::setup_lights,
                    scene::factory::spawn_staircase,
                    ui::reset::setup_panel,
                )
                    .chain(),
            )
            // One cooperative pass per frame: queued resizes first, then the
            // physics step, then body-to-mesh sync, then camera damping.
            .add_systems(
                Update,
                (
                    scene::camera::handle_window_resize,
                    scene::sync::step_simulation,
                    scene::sync::sync_meshes,
                    scene::camera::orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (ui::reset::reset_on_key, scene::exit_on_esc_or_q),
            )
            .add_systems(EguiPrimaryContextPass, ui::panel::draw_panel);
    }
}
