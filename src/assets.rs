use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;

use crate::config::SceneConfig;
use crate::motion::HeadingTracker;
use crate::orbit::{Heading, Orbit};

/// `Running` is entered once, after both models have loaded.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Resource, Debug)]
pub struct SceneHandles {
    pub planet: Handle<Scene>,
    pub spaceship: Handle<Scene>,
}

#[derive(Component, Debug)]
pub struct Planet;

#[derive(Component, Debug)]
pub struct Spaceship;

#[derive(Component, Debug)]
pub struct LoaderOverlay;

#[derive(Component, Debug)]
pub struct LoaderText;

/// Summary of both scene loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Pending,
    Ready,
    Failed(String),
}

pub fn combine(states: &[(&str, RecursiveDependencyLoadState)]) -> Progress {
    let mut ready = true;
    for (path, state) in states {
        match state {
            RecursiveDependencyLoadState::Failed(err) => {
                return Progress::Failed(format!("{path}: {err}"));
            }
            RecursiveDependencyLoadState::Loaded => {}
            _ => ready = false,
        }
    }
    if ready {
        Progress::Ready
    } else {
        Progress::Pending
    }
}

pub struct Plugin;

impl Plugin {
    fn request_scenes(
        mut commands: Commands,
        asset_server: Res<AssetServer>,
        config: Res<SceneConfig>,
    ) {
        info!(
            "loading scenes {} and {}",
            config.assets.planet, config.assets.spaceship
        );
        commands.insert_resource(SceneHandles {
            planet: asset_server
                .load(GltfAssetLabel::Scene(0).from_asset(config.assets.planet.clone())),
            spaceship: asset_server
                .load(GltfAssetLabel::Scene(0).from_asset(config.assets.spaceship.clone())),
        });
    }

    fn spawn_overlay(mut commands: Commands) {
        commands
            .spawn((
                LoaderOverlay,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                BackgroundColor(Color::srgb_u8(0x21, 0x21, 0x21)),
            ))
            .with_child((
                LoaderText,
                Text::new("Loading…"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
    }

    fn check_scenes(
        asset_server: Res<AssetServer>,
        handles: Res<SceneHandles>,
        config: Res<SceneConfig>,
        mut next_state: ResMut<NextState<AppState>>,
        mut query_text: Query<&mut Text, With<LoaderText>>,
        mut reported: Local<bool>,
    ) {
        let progress = combine(&[
            (
                config.assets.planet.as_str(),
                asset_server.recursive_dependency_load_state(&handles.planet),
            ),
            (
                config.assets.spaceship.as_str(),
                asset_server.recursive_dependency_load_state(&handles.spaceship),
            ),
        ]);

        match progress {
            Progress::Pending => {}
            Progress::Ready => {
                info!("scenes loaded");
                next_state.set(AppState::Running);
            }
            Progress::Failed(reason) => {
                // Stay on the loader; there is nothing to animate without both models.
                if !*reported {
                    error!("scene failed to load: {reason}");
                    for mut text in query_text.iter_mut() {
                        text.0 = format!("Failed to load {reason}");
                    }
                    *reported = true;
                }
            }
        }
    }

    pub fn spawn_scene(
        mut commands: Commands,
        handles: Res<SceneHandles>,
        config: Res<SceneConfig>,
        query_overlay: Query<Entity, With<LoaderOverlay>>,
    ) {
        for overlay in query_overlay.iter() {
            commands.entity(overlay).despawn();
        }

        commands.spawn((
            Planet,
            SceneRoot(handles.planet.clone()),
            Transform::from_translation(Vec3::from_array(config.planet.position))
                .with_scale(Vec3::splat(config.planet.scale)),
        ));

        commands.spawn((
            Spaceship,
            SceneRoot(handles.spaceship.clone()),
            Transform::from_translation(Vec3::from_array(config.spaceship.start_position))
                .with_scale(Vec3::splat(config.spaceship.scale)),
            Orbit::new(config.orbit.path()),
            Heading(HeadingTracker::new(Vec3::from_array(
                config.steering.initial_heading,
            ))),
        ));
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_systems(Startup, (Self::request_scenes, Self::spawn_overlay))
            .add_systems(
                Update,
                Self::check_scenes.run_if(in_state(AppState::Loading)),
            )
            .add_systems(OnEnter(AppState::Running), Self::spawn_scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_only_when_everything_loaded() {
        use RecursiveDependencyLoadState::*;
        assert_eq!(combine(&[("a", Loaded), ("b", Loaded)]), Progress::Ready);
        assert_eq!(combine(&[("a", Loaded), ("b", Loading)]), Progress::Pending);
        assert_eq!(combine(&[("a", NotLoaded), ("b", Loaded)]), Progress::Pending);
        assert_eq!(combine(&[]), Progress::Ready);
    }
}
