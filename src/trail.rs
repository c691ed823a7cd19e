use std::collections::VecDeque;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use itertools::Itertools;

use crate::assets::{AppState, Spaceship};
use crate::config::SceneConfig;
use crate::input::actions::Action;

/// Recent displayed positions, oldest first.
#[derive(Component, Debug)]
pub struct Trail {
    points: VecDeque<Vec3>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec3) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Segments with an opacity that fades toward the oldest end.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3, f32)> + '_ {
        let count = self.points.len().saturating_sub(1).max(1) as f32;
        self.points
            .iter()
            .copied()
            .tuple_windows()
            .enumerate()
            .map(move |(i, (a, b))| (a, b, (i + 1) as f32 / count))
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowTrail(pub bool);

pub struct Plugin;

impl Plugin {
    fn attach_trail(
        mut commands: Commands,
        config: Res<SceneConfig>,
        query: Query<Entity, (With<Spaceship>, Without<Trail>)>,
    ) {
        for entity in query.iter() {
            commands.entity(entity).insert(Trail::new(config.trail.capacity));
        }
    }

    fn record(mut query: Query<(&Transform, &mut Trail)>) {
        for (transform, mut trail) in query.iter_mut() {
            trail.push(transform.translation);
        }
    }

    fn toggle(mut action_reader: MessageReader<Action>, mut show: ResMut<ShowTrail>) {
        for action in action_reader.read() {
            if *action == Action::ToggleTrail {
                show.0 = !show.0;
                info!("trail {}", if show.0 { "shown" } else { "hidden" });
            }
        }
    }

    fn draw(
        mut gizmos: Gizmos,
        show: Res<ShowTrail>,
        config: Res<SceneConfig>,
        query: Query<&Trail>,
    ) {
        if !show.0 {
            return;
        }

        let path = config.orbit.path();
        // Circle gizmos lie in XY; the orbit lies in YZ.
        gizmos.circle(
            Isometry3d::new(path.center, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            path.effective_radius(),
            Color::srgba(1.0, 1.0, 1.0, 0.15),
        );

        for trail in query.iter() {
            for (a, b, alpha) in trail.segments() {
                gizmos.line(a, b, Color::srgba(0.4, 0.8, 1.0, alpha));
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_message::<Action>()
            .add_systems(
                OnEnter(AppState::Running),
                Self::attach_trail.after(crate::assets::Plugin::spawn_scene),
            )
            .add_systems(
                Update,
                (
                    Self::toggle,
                    Self::record
                        .after(crate::orbit::Plugin::tick_orbit)
                        .run_if(in_state(AppState::Running)),
                    Self::draw,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest_points() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Vec3::splat(i as f32));
        }
        let segments: Vec<_> = trail.segments().map(|(a, b, _)| (a, b)).collect();
        assert_eq!(
            segments,
            vec![
                (Vec3::splat(2.0), Vec3::splat(3.0)),
                (Vec3::splat(3.0), Vec3::splat(4.0)),
            ]
        );
    }

    #[test]
    fn segments_fade_toward_the_tail() {
        let mut trail = Trail::new(8);
        for i in 0..4 {
            trail.push(Vec3::X * i as f32);
        }
        let segments: Vec<_> = trail.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].0, Vec3::ZERO);
        assert_eq!(segments[2].1, Vec3::X * 3.0);
        assert!(segments[0].2 < segments[2].2);
        assert_eq!(segments[2].2, 1.0);
    }

    #[test]
    fn single_point_has_no_segments() {
        let mut trail = Trail::new(8);
        trail.push(Vec3::ONE);
        assert_eq!(trail.segments().count(), 0);
    }
}
