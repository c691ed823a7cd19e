use bevy::prelude::*;

use crate::assets::{AppState, Planet};
use crate::config::SceneConfig;

pub struct Plugin;

impl Plugin {
    // Fixed step per frame, not per second.
    fn spin_planet(config: Res<SceneConfig>, mut query: Query<&mut Transform, With<Planet>>) {
        for mut transform in query.iter_mut() {
            transform.rotate_y(config.planet.spin_per_frame);
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            Self::spin_planet.run_if(in_state(AppState::Running)),
        );
    }
}
