//! Scene configuration with defaults, optional RON overrides and CLI overrides.

use std::path::{Path, PathBuf};

use bevy::math::Vec3;
use bevy::prelude::Resource;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::motion::{MotionMode, OrbitPath, Steering};

/// Upper bound on recorded trail points; the buffer is allocated up front.
pub const MAX_TRAIL_CAPACITY: usize = 100_000;

/// Errors that can occur when loading or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// A value is out of its usable range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Command-line arguments. Values override the loaded config.
#[derive(Parser, Debug, Default)]
#[command(name = "orbit-spaceship", about = "A spaceship orbiting a planet")]
pub struct CliArgs {
    /// RON file with scene settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Motion mode for the spaceship.
    #[arg(long, value_enum)]
    pub mode: Option<MotionMode>,

    /// Exit after this many frames.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Start with the flight trail hidden.
    #[arg(long)]
    pub no_trail: bool,

    /// Log filter passed to the log plugin (e.g. "info,wgpu=error").
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub orbit: OrbitConfig,
    pub steering: SteeringConfig,
    pub planet: PlanetConfig,
    pub spaceship: SpaceshipConfig,
    pub camera: CameraConfig,
    pub assets: AssetsConfig,
    pub trail: TrailConfig,
    /// Frames to run before exiting. `None` runs until the window closes.
    pub frame_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    pub center: [f32; 3],
    pub radius: f32,
    pub angular_rate: f32,
    pub radius_fraction: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let path = OrbitPath::default();
        Self {
            center: path.center.to_array(),
            radius: path.radius,
            angular_rate: path.angular_rate,
            radius_fraction: path.radius_fraction,
        }
    }
}

impl OrbitConfig {
    pub fn path(&self) -> OrbitPath {
        OrbitPath {
            center: Vec3::from_array(self.center),
            radius: self.radius,
            angular_rate: self.angular_rate,
            radius_fraction: self.radius_fraction,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SteeringConfig {
    pub turn_scale: f32,
    pub speed: f32,
    pub mode: MotionMode,
    pub initial_heading: [f32; 3],
}

impl Default for SteeringConfig {
    fn default() -> Self {
        let steering = Steering::default();
        Self {
            turn_scale: steering.turn_scale,
            speed: steering.speed,
            mode: if cfg!(feature = "exact_orbit") {
                MotionMode::Exact
            } else {
                MotionMode::Steered
            },
            initial_heading: [0.0, 1.0, 0.0],
        }
    }
}

impl SteeringConfig {
    pub fn steering(&self) -> Steering {
        Steering {
            turn_scale: self.turn_scale,
            speed: self.speed,
            mode: self.mode,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub position: [f32; 3],
    pub scale: f32,
    /// Radians about +Y added every frame.
    pub spin_per_frame: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.25, 0.0],
            scale: 0.05,
            spin_per_frame: 0.002,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpaceshipConfig {
    pub start_position: [f32; 3],
    pub scale: f32,
}

impl Default for SpaceshipConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 1.5, 0.0],
            scale: 0.04,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start: [f32; 3],
    pub intro_target: [f32; 3],
    pub intro_secs: f32,
    pub focus: [f32; 3],
    /// Radians per pixel of mouse drag.
    pub sensitivity: f32,
    /// Fraction of the distance removed per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 2000.0,
            start: [1.5, 1.0, -0.75],
            intro_target: [0.5, 1.0, 1.0],
            intro_secs: 3.0,
            focus: [0.0, 0.0, 0.0],
            sensitivity: 0.005,
            zoom_speed: 0.1,
            min_distance: 0.3,
            max_distance: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub planet: String,
    pub spaceship: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            planet: "gltf/planet/scene.gltf".to_string(),
            spaceship: "gltf/spaceship/scene.gltf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub enabled: bool,
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 240,
        }
    }
}

impl SceneConfig {
    /// Reads `path` if given, otherwise starts from defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                ron::from_str(&contents).map_err(ConfigError::Parse)?
            }
            None => SceneConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `args` and applies the remaining CLI overrides.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::load(args.config.as_deref())?;
        config.apply_cli_overrides(args);
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(mode) = args.mode {
            self.steering.mode = mode;
        }
        if let Some(frames) = args.frames {
            self.frame_limit = Some(frames);
        }
        if args.no_trail {
            self.trail.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("orbit.radius", self.orbit.radius)?;
        positive("orbit.radius_fraction", self.orbit.radius_fraction)?;
        if !self.orbit.angular_rate.is_finite() {
            return Err(ConfigError::Invalid("orbit.angular_rate must be finite".into()));
        }
        if !(self.steering.turn_scale.is_finite() && self.steering.turn_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "steering.turn_scale must be non-negative, got {}",
                self.steering.turn_scale
            )));
        }
        positive("steering.speed", self.steering.speed)?;
        if Vec3::from_array(self.steering.initial_heading)
            .try_normalize()
            .is_none()
        {
            return Err(ConfigError::Invalid(
                "steering.initial_heading must be a non-zero vector".into(),
            ));
        }
        positive("planet.scale", self.planet.scale)?;
        if !self.planet.spin_per_frame.is_finite() {
            return Err(ConfigError::Invalid("planet.spin_per_frame must be finite".into()));
        }
        positive("spaceship.scale", self.spaceship.scale)?;
        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near", self.camera.near)?;
        positive("camera.far", self.camera.far)?;
        positive("camera.intro_secs", self.camera.intro_secs)?;
        positive("camera.sensitivity", self.camera.sensitivity)?;
        positive("camera.min_distance", self.camera.min_distance)?;
        positive("camera.max_distance", self.camera.max_distance)?;
        // Zoom scales the distance by (1 - zoom_speed) per wheel line.
        if !(self.camera.zoom_speed > 0.0 && self.camera.zoom_speed < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.zoom_speed must be between 0 and 1, got {}",
                self.camera.zoom_speed
            )));
        }
        if self.camera.near >= self.camera.far {
            return Err(ConfigError::Invalid(format!(
                "camera.near ({}) must be below camera.far ({})",
                self.camera.near, self.camera.far
            )));
        }
        if self.camera.min_distance > self.camera.max_distance {
            return Err(ConfigError::Invalid(
                "camera.min_distance must not exceed camera.max_distance".into(),
            ));
        }
        if !(2..=MAX_TRAIL_CAPACITY).contains(&self.trail.capacity) {
            return Err(ConfigError::Invalid(format!(
                "trail.capacity must be between 2 and {MAX_TRAIL_CAPACITY}, got {}",
                self.trail.capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.orbit.path(), OrbitPath::default());
        assert_eq!(config.steering.turn_scale, 0.1);
        assert_eq!(config.steering.speed, 0.05);
        assert_eq!(config.frame_limit, None);
    }

    #[test]
    fn ron_roundtrip() {
        let config = SceneConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        let parsed: SceneConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(steering: (mode: exact, speed: 0.2), trail: (enabled: false))").unwrap();

        let config = SceneConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.steering.mode, MotionMode::Exact);
        assert_eq!(config.steering.speed, 0.2);
        assert!(!config.trail.enabled);
        assert_eq!(config.steering.turn_scale, 0.1);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(Some(&dir.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(orbit: (radius: \"far\"))").unwrap();
        let err = SceneConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = SceneConfig::default();
        config.steering.speed = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.camera.near = 3000.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.steering.initial_heading = [0.0; 3];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.orbit.radius = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        for zoom_speed in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let mut config = SceneConfig::default();
            config.camera.zoom_speed = zoom_speed;
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "zoom_speed={zoom_speed}"
            );
        }

        for sensitivity in [0.0, -0.005, f32::INFINITY, f32::NAN] {
            let mut config = SceneConfig::default();
            config.camera.sensitivity = sensitivity;
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }

        let mut config = SceneConfig::default();
        config.camera.max_distance = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.camera.far = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.planet.spin_per_frame = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.trail.capacity = usize::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SceneConfig::default();
        config.trail.capacity = MAX_TRAIL_CAPACITY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cli_overrides() {
        let mut config = SceneConfig::default();
        let args = CliArgs {
            mode: Some(MotionMode::Exact),
            frames: Some(120),
            no_trail: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.steering.mode, MotionMode::Exact);
        assert_eq!(config.frame_limit, Some(120));
        assert!(!config.trail.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.orbit, OrbitConfig::default());
    }

    #[test]
    fn cli_parses() {
        let args = CliArgs::parse_from(["orbit-spaceship", "--mode", "exact", "--frames", "10"]);
        assert_eq!(args.mode, Some(MotionMode::Exact));
        assert_eq!(args.frames, Some(10));
        assert!(!args.no_trail);
    }
}
