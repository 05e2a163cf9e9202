use bevy::prelude::*;

use stairfall::StairfallPlugin;

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "stairfall".into(),
                ..default()
            }),
            ..default()
        }))
        // Scene, physics, and debug panel
        .add_plugins(StairfallPlugin)
        .run();
}
