use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

/// Pixel scrolls are reported in lines of this many pixels.
const PIXELS_PER_LINE: f32 = 100.0;

/// Wheel travel in lines; positive zooms in.
#[derive(Message, Default, Debug)]
pub struct Zoom(pub f32);

pub fn lines(wheel: &MouseWheel) -> f32 {
    match wheel.unit {
        MouseScrollUnit::Line => wheel.y,
        MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_LINE,
    }
}

pub struct Plugin;

impl Plugin {
    fn process_inputs(
        mut mouse_wheel_reader: MessageReader<MouseWheel>,
        mut zoom_writer: MessageWriter<Zoom>,
    ) {
        let amount: f32 = mouse_wheel_reader.read().map(lines).sum();
        if amount != 0.0 {
            zoom_writer.write(Zoom(amount));
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Zoom>()
            .add_systems(PreUpdate, Self::process_inputs.after(bevy::input::InputSystems));
    }
}
