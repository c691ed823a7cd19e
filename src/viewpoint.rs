use bevy::ecs::message::MessageReader;
use bevy::math::Vec3;
use bevy::prelude::*;

use super::input;
use super::intro;

/// Keeps pitch away from the poles, where `look_at` loses its up vector.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Orbit controls around `focus`: drag to rotate, wheel to zoom.
#[derive(Component, Debug, Clone)]
pub struct Viewpoint {
    pub focus: Vec3,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            min_distance: 0.3,
            max_distance: 15.0,
        }
    }
}

impl Viewpoint {
    /// Applies a drag of `drag` pixels and `zoom` wheel lines to a camera offset from the focus.
    pub fn orbit(&self, offset: Vec3, drag: Vec2, zoom: f32) -> Vec3 {
        let distance = offset.length();
        let Some(direction) = offset.try_normalize() else {
            return Vec3::Z * self.min_distance;
        };

        let yaw = f32::atan2(direction.x, direction.z) - drag.x * self.sensitivity;
        let pitch = f32::clamp(
            direction.y.clamp(-1.0, 1.0).asin() + drag.y * self.sensitivity,
            -MAX_PITCH,
            MAX_PITCH,
        );
        let distance = f32::clamp(
            distance * (1.0 - self.zoom_speed).powf(zoom),
            self.min_distance,
            self.max_distance,
        );

        distance
            * Vec3::new(
                pitch.cos() * yaw.sin(),
                pitch.sin(),
                pitch.cos() * yaw.cos(),
            )
    }
}

pub struct Plugin;

impl Plugin {
    fn update_viewpoint(
        mut query_cameras: Query<(&mut Transform, &Viewpoint)>,
        mut delta_reader: MessageReader<input::mouse_motion::Delta>,
        mut zoom_reader: MessageReader<input::zoom::Zoom>,
    ) {
        let drag: Vec2 = delta_reader.read().map(|delta| delta.0).sum();
        let zoom: f32 = zoom_reader.read().map(|zoom| zoom.0).sum();

        for (mut transform, viewpoint) in query_cameras.iter_mut() {
            if drag != Vec2::ZERO || zoom != 0.0 {
                let offset = transform.translation - viewpoint.focus;
                transform.translation = viewpoint.focus + viewpoint.orbit(offset, drag, zoom);
            }
            if transform.translation != viewpoint.focus {
                transform.look_at(viewpoint.focus, Vec3::Y);
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_message::<input::mouse_motion::Delta>()
            .add_message::<input::zoom::Zoom>()
            .add_systems(
                Update,
                Self::update_viewpoint.after(intro::Plugin::ease_camera),
            );
    }
}
