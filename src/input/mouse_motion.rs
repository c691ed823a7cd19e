use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::input::mouse::{MouseButton, MouseMotion};
use bevy::prelude::*;

use crate::controls;

/// Mouse travel in pixels while the orbit button is held.
#[derive(Message, Default, Debug)]
pub struct Delta(pub bevy::math::Vec2);

pub struct Plugin;

impl Plugin {
    fn process_inputs(
        controls: Res<controls::Controls>,
        keyboard_input: Res<bevy::input::ButtonInput<KeyCode>>,
        mouse_input: Res<bevy::input::ButtonInput<MouseButton>>,
        mut mouse_motion_reader: MessageReader<MouseMotion>,
        mut delta_writer: MessageWriter<Delta>,
    ) {
        let mut delta = bevy::math::Vec2::ZERO;
        for event in mouse_motion_reader.read() {
            delta += event.delta;
        }

        if delta != bevy::math::Vec2::ZERO
            && controls.orbit.pressed(&keyboard_input, &mouse_input)
        {
            delta_writer.write(Delta(delta));
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Delta>()
            .add_systems(PreUpdate, Self::process_inputs.after(bevy::input::InputSystems));
    }
}
