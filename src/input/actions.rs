use bevy::ecs::message::{Message, MessageWriter};
use bevy::input::{keyboard::KeyCode, mouse::MouseButton, ButtonInput};
use bevy::prelude::*;

use crate::controls;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleMotionMode,
    ToggleTrail,
}

pub struct Plugin;

impl Plugin {
    fn process_inputs(
        controls: Res<controls::Controls>,
        keyboard_input: Res<ButtonInput<KeyCode>>,
        mouse_input: Res<ButtonInput<MouseButton>>,
        mut action_writer: MessageWriter<Action>,
    ) {
        if controls
            .toggle_motion_mode
            .just_pressed(&keyboard_input, &mouse_input)
        {
            action_writer.write(Action::ToggleMotionMode);
        }
        if controls
            .toggle_trail
            .just_pressed(&keyboard_input, &mouse_input)
        {
            action_writer.write(Action::ToggleTrail);
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Action>()
            .add_systems(PreUpdate, Self::process_inputs.after(bevy::input::InputSystems));
    }
}
