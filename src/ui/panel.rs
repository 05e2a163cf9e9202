use bevy::ecs::system::SystemId;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use rapier3d::prelude::RigidBodyHandle;

use crate::physics::PhysicsWorld;

/// What a slider mutates. Targets point at live simulation state, so moving
/// a slider edits the body in place with no re-registration.
#[derive(Clone, Copy, Debug)]
pub enum ControlTarget {
    BodyMass(RigidBodyHandle),
}

pub struct SliderControl {
    pub label: String,
    pub target: ControlTarget,
    pub min: f32,
    pub max: f32,
    pub step: f64,
}

pub struct ActionControl {
    pub label: String,
    pub system: SystemId,
}

/// The debug control panel: a registry of sliders and action buttons drawn by
/// [`draw_panel`] each frame. Controls are discarded wholesale on reset and
/// re-registered against the fresh scene.
#[derive(Resource, Default)]
pub struct ControlPanel {
    sliders: Vec<SliderControl>,
    actions: Vec<ActionControl>,
}

impl ControlPanel {
    pub fn register_control(
        &mut self,
        label: impl Into<String>,
        target: ControlTarget,
        min: f32,
        max: f32,
        step: f64,
    ) {
        self.sliders.push(SliderControl {
            label: label.into(),
            target,
            min,
            max,
            step,
        });
    }

    pub fn register_action(&mut self, label: impl Into<String>, system: SystemId) {
        self.actions.push(ActionControl {
            label: label.into(),
            system,
        });
    }

    pub fn discard_all(&mut self) {
        self.sliders.clear();
        self.actions.clear();
    }

    pub fn slider_count(&self) -> usize {
        self.sliders.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

/// Render the panel. Sliders read their current value from the live target
/// and write changes straight back; buttons dispatch their stored one-shot
/// system.
pub fn draw_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<ControlPanel>,
    mut physics: ResMut<PhysicsWorld>,
    mut commands: Commands,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    egui::Window::new("Controls").show(ctx, |ui| {
        for action in &panel.actions {
            if ui.button(&action.label).clicked() {
                commands.run_system(action.system);
            }
        }
        for slider in &mut panel.sliders {
            match slider.target {
                ControlTarget::BodyMass(body) => {
                    let Some(mut mass) = physics.body_mass(body) else {
                        continue;
                    };
                    let response = ui.add(
                        egui::Slider::new(&mut mass, slider.min..=slider.max)
                            .step_by(slider.step)
                            .text(&slider.label),
                    );
                    if response.changed() {
                        physics.set_body_mass(body, mass);
                    }
                }
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_action(world: &mut World) -> SystemId {
        world.register_system(|| {})
    }

    #[test]
    fn registered_controls_are_discarded_wholesale() {
        let mut world = World::new();
        let action = noop_action(&mut world);
        let mut physics = PhysicsWorld::default();
        let body = physics.add_dynamic_ball(1.0, Vec3::ZERO, 1.0);

        let mut panel = ControlPanel::default();
        panel.register_action("Reset", action);
        panel.register_control("Sphere mass", ControlTarget::BodyMass(body), 0.5, 5.0, 0.001);
        assert_eq!(panel.action_count(), 1);
        assert_eq!(panel.slider_count(), 1);

        panel.discard_all();
        assert_eq!(panel.action_count(), 0);
        assert_eq!(panel.slider_count(), 0);
    }
}
