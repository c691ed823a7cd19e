use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;

mod assets;
mod config;
mod controls;
mod frame_limit;
mod input;
mod intro;
mod motion;
mod orbit;
mod planet;
mod trail;
mod viewpoint;

use config::{CliArgs, SceneConfig};

fn main() -> AppExit {
    let args = CliArgs::parse();

    let mut log_plugin = LogPlugin::default();
    if let Some(filter) = &args.log_filter {
        log_plugin.filter = filter.clone();
    }

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "orbit-spaceship".to_string(),
                    fit_canvas_to_parent: true,
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(log_plugin),
    );

    // Config errors are reported through the log plugin, before the window opens.
    let config = match SceneConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return AppExit::error();
        }
    };

    app.insert_resource(ClearColor(Color::srgb_u8(0x21, 0x21, 0x21)))
        .insert_resource(orbit::MotionSettings(config.steering.steering()))
        .insert_resource(trail::ShowTrail(config.trail.enabled))
        .add_plugins(controls::Plugin)
        .add_plugins(input::Plugin)
        .add_plugins(assets::Plugin)
        .add_plugins(orbit::Plugin)
        .add_plugins(planet::Plugin)
        .add_plugins(intro::Plugin)
        .add_plugins(viewpoint::Plugin)
        .add_plugins(trail::Plugin)
        .add_plugins(frame_limit::Plugin)
        .add_systems(Startup, setup);

    if let Some(frames) = config.frame_limit {
        app.insert_resource(frame_limit::FrameLimit::new(frames));
    }

    info!(
        "starting with {:?} motion{}",
        config.steering.mode,
        match &args.config {
            Some(path) => format!(", config from {}", path.display()),
            None => String::new(),
        }
    );
    app.insert_resource(config);

    app.run()
}

fn setup(mut commands: Commands, config: Res<config::SceneConfig>) {
    let camera = &config.camera;
    let focus = Vec3::from_array(camera.focus);

    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Tonemapping::TonyMcMapface,
        DistanceFog {
            color: Color::WHITE,
            falloff: FogFalloff::Linear {
                start: 10.0,
                end: 20.0,
            },
            ..default()
        },
        Transform::from_translation(Vec3::from_array(camera.start)).looking_at(focus, Vec3::Y),
        viewpoint::Viewpoint {
            focus,
            sensitivity: camera.sensitivity,
            zoom_speed: camera.zoom_speed,
            min_distance: camera.min_distance,
            max_distance: camera.max_distance,
        },
        intro::IntroTarget {
            position: Vec3::from_array(camera.intro_target),
            secs: camera.intro_secs,
        },
    ));
}
