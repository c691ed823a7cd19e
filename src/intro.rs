use bevy::math::curve::easing::{EaseFunction, EasingCurve};
use bevy::math::curve::Curve;
use bevy::prelude::*;

use crate::assets::AppState;

/// One-shot camera move, eased over a fixed duration.
#[derive(Component, Debug)]
pub struct CameraIntro {
    curve: EasingCurve<Vec3>,
    to: Vec3,
    timer: Timer,
}

impl CameraIntro {
    pub fn new(from: Vec3, to: Vec3, secs: f32) -> Self {
        Self {
            curve: EasingCurve::new(from, to, EaseFunction::ExponentialInOut),
            to,
            timer: Timer::from_seconds(secs, TimerMode::Once),
        }
    }

    pub fn position(&self) -> Vec3 {
        if self.timer.is_finished() {
            return self.to;
        }
        self.curve.sample_clamped(self.timer.fraction())
    }
}

/// Where the intro should head once the scene is running.
#[derive(Component, Debug)]
pub struct IntroTarget {
    pub position: Vec3,
    pub secs: f32,
}

pub struct Plugin;

impl Plugin {
    fn start_intro(
        mut commands: Commands,
        query: Query<(Entity, &Transform, &IntroTarget)>,
    ) {
        for (entity, transform, target) in query.iter() {
            commands
                .entity(entity)
                .insert(CameraIntro::new(
                    transform.translation,
                    target.position,
                    target.secs,
                ))
                .remove::<IntroTarget>();
        }
    }

    pub fn ease_camera(
        mut commands: Commands,
        time: Res<Time>,
        mut query: Query<(Entity, &mut Transform, &mut CameraIntro)>,
    ) {
        for (entity, mut transform, mut intro) in query.iter_mut() {
            intro.timer.tick(time.delta());
            transform.translation = intro.position();
            if intro.timer.is_finished() {
                debug!("camera intro finished");
                commands.entity(entity).remove::<CameraIntro>();
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), Self::start_intro)
            .add_systems(Update, Self::ease_camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    #[test]
    fn eases_from_start_to_target() {
        let from = Vec3::new(1.5, 1.0, -0.75);
        let to = Vec3::new(0.5, 1.0, 1.0);
        let mut intro = CameraIntro::new(from, to, 3.0);
        assert!((intro.position() - from).length() < 5e-3);

        intro.timer.tick(Duration::from_millis(1500));
        let middle = intro.position();
        assert!((middle - (from + to) * 0.5).length() < 1e-3);

        intro.timer.tick(Duration::from_secs(10));
        assert!((intro.position() - to).length() < 1e-6);
    }

    #[test]
    fn intro_runs_once_and_is_removed() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_resource::<Time>()
            .insert_state(AppState::Loading)
            .add_plugins(Plugin);

        let camera = app
            .world_mut()
            .spawn((
                Transform::from_xyz(1.5, 1.0, -0.75),
                IntroTarget {
                    position: Vec3::new(0.5, 1.0, 1.0),
                    secs: 3.0,
                },
            ))
            .id();

        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::Running);
        app.update();
        assert!(app.world().get::<CameraIntro>(camera).is_some());

        for _ in 0..4 {
            app.world_mut()
                .resource_mut::<Time>()
                .advance_by(Duration::from_secs(1));
            app.update();
        }

        assert!(app.world().get::<CameraIntro>(camera).is_none());
        assert!(app.world().get::<IntroTarget>(camera).is_none());
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!((transform.translation - Vec3::new(0.5, 1.0, 1.0)).length() < 1e-6);
    }
}
