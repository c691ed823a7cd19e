use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Angles below this are treated as "no turn" and produce an identity increment.
pub const ANGLE_EPSILON: f32 = 1e-6;

/// Idealized circular path in the YZ plane, as a pure function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPath {
    /// Point the path circles around.
    pub center: Vec3,
    /// Nominal orbit radius.
    pub radius: f32,
    /// Radians per second of the sample angle.
    pub angular_rate: f32,
    /// Share of `radius` actually travelled.
    pub radius_fraction: f32,
}

impl Default for OrbitPath {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 1.5,
            angular_rate: 0.2,
            radius_fraction: 0.55,
        }
    }
}

impl OrbitPath {
    /// Distance of every sample from `center`.
    pub fn effective_radius(&self) -> f32 {
        self.radius * self.radius_fraction
    }

    pub fn position(&self, elapsed_secs: f32) -> Vec3 {
        let (sin, cos) = (elapsed_secs * self.angular_rate).sin_cos();
        let r = self.effective_radius();
        self.center + Vec3::new(0.0, cos * r, sin * r)
    }
}

/// Whether the displayed position rides the ideal orbit or is pushed along the heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    #[default]
    Steered,
    Exact,
}

impl MotionMode {
    pub fn toggled(self) -> Self {
        match self {
            MotionMode::Steered => MotionMode::Exact,
            MotionMode::Exact => MotionMode::Steered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// How much of the sample direction is blended into the heading each frame.
    pub turn_scale: f32,
    /// Offset along the heading applied to the displayed position.
    pub speed: f32,
    pub mode: MotionMode,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            turn_scale: 0.1,
            speed: 0.05,
            mode: MotionMode::default(),
        }
    }
}

/// Result of one tracker update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub heading: Vec3,
    /// Where the object should be drawn this frame.
    pub position: Vec3,
    /// Rotation to premultiply onto the accumulated orientation.
    pub rotation: Quat,
}

/// Keeps a unit heading that turns gradually toward a steering target.
///
/// Turning is accumulated: each update yields the incremental rotation between the
/// old and new heading, never an absolute orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingTracker {
    heading: Vec3,
}

impl Default for HeadingTracker {
    fn default() -> Self {
        Self { heading: Vec3::Y }
    }
}

impl HeadingTracker {
    /// Starts from `heading`, or +Y if it cannot be normalized.
    pub fn new(heading: Vec3) -> Self {
        Self {
            heading: heading.try_normalize().unwrap_or(Vec3::Y),
        }
    }

    pub fn heading(&self) -> Vec3 {
        self.heading
    }

    /// Steers from the current heading toward `target`, the rule the orbit system uses.
    pub fn steer(&mut self, target: Vec3, steering: &Steering) -> Step {
        self.advance(self.heading, target, steering)
    }

    /// Turns by the direction from `previous` to `target`.
    pub fn advance(&mut self, previous: Vec3, target: Vec3, steering: &Steering) -> Step {
        let delta = (target - previous).normalize_or_zero();
        let previous_heading = self.heading;

        // A sum that collapses to zero (only possible with turn_scale >= 1) keeps the old heading.
        self.heading = (previous_heading + delta * steering.turn_scale)
            .try_normalize()
            .unwrap_or(previous_heading);

        let position = match steering.mode {
            MotionMode::Steered => target + self.heading * steering.speed,
            MotionMode::Exact => target,
        };

        Step {
            heading: self.heading,
            position,
            rotation: turn_between(previous_heading, self.heading),
        }
    }
}

/// Axis-angle rotation taking unit vector `from` onto unit vector `to`.
///
/// Returns identity when the turn is too small or the axis is undefined.
pub fn turn_between(from: Vec3, to: Vec3) -> Quat {
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if angle.is_nan() || angle < ANGLE_EPSILON {
        return Quat::IDENTITY;
    }
    match from.cross(to).try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, angle),
        None => Quat::IDENTITY,
    }
}

/// Composes `increment` in world space ahead of `orientation`.
pub fn premultiply(increment: Quat, orientation: Quat) -> Quat {
    (increment * orientation).normalize()
}
