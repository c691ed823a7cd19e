use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

/// Stops the app after a fixed number of frames.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameLimit {
    pub frames: u32,
    elapsed: u32,
}

impl FrameLimit {
    pub fn new(frames: u32) -> Self {
        Self { frames, elapsed: 0 }
    }
}

pub struct Plugin;

impl Plugin {
    fn count_frame(mut limit: ResMut<FrameLimit>, mut exit_writer: MessageWriter<AppExit>) {
        limit.elapsed += 1;
        if limit.elapsed >= limit.frames {
            info!("frame limit of {} reached, exiting", limit.frames);
            exit_writer.write(AppExit::Success);
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Last,
            Self::count_frame.run_if(resource_exists::<FrameLimit>),
        );
    }
}
