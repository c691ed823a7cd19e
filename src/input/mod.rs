use bevy::prelude::*;

pub mod actions;
pub mod mouse_motion;
pub mod zoom;

pub struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(actions::Plugin);
        app.add_plugins(mouse_motion::Plugin);
        app.add_plugins(zoom::Plugin);
    }
}
