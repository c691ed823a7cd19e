use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::assets::AppState;
use crate::input::actions::Action;
use crate::motion::{self, HeadingTracker, OrbitPath, Steering};

#[derive(Component, Debug)]
pub struct Orbit {
    pub path: OrbitPath,
    /// Clock reading of the first tick, so the path starts at phase zero.
    pub started_at: Option<f32>,
}

impl Orbit {
    pub fn new(path: OrbitPath) -> Self {
        Self {
            path,
            started_at: None,
        }
    }

    /// Seconds of orbit travelled at clock reading `now`.
    pub fn local_time(&mut self, now: f32) -> f32 {
        now - *self.started_at.get_or_insert(now)
    }
}

/// Direction of travel, carried across frames.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct Heading(pub HeadingTracker);

#[derive(Resource, Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct MotionSettings(pub Steering);

pub struct Plugin;

impl Plugin {
    pub fn tick_orbit(
        time: Res<Time>,
        settings: Res<MotionSettings>,
        mut query: Query<(&mut Transform, &mut Orbit, &mut Heading)>,
    ) {
        let now = time.elapsed_secs();

        for (mut transform, mut orbit, mut heading) in query.iter_mut() {
            let t = orbit.local_time(now);
            let target = orbit.path.position(t);
            let step = heading.steer(target, &settings);

            transform.translation = step.position;
            transform.rotation = motion::premultiply(step.rotation, transform.rotation);
        }
    }

    fn toggle_mode(mut action_reader: MessageReader<Action>, mut settings: ResMut<MotionSettings>) {
        for action in action_reader.read() {
            if *action == Action::ToggleMotionMode {
                settings.mode = settings.mode.toggled();
                info!("motion mode: {:?}", settings.mode);
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionSettings>()
            .add_message::<Action>()
            .add_systems(
                Update,
                (
                    Self::toggle_mode,
                    Self::tick_orbit.run_if(in_state(AppState::Running)),
                )
                    .chain(),
            );
    }
}
