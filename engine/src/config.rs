//! Walk Mode Configuration
//!
//! Every tunable of the walking avatar in one serde structure. Files are
//! JSON; any missing field falls back to its default, so a config only needs
//! the values it changes:
//!
//! ```json
//! { "locomotion": { "base_speed": 5.0 }, "look": { "smoothing": 0.5 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::{KeyBinding, KeyBindings};

/// Reference frame time all per-frame factors are defined against.
pub const REFERENCE_FRAME_DT: f64 = 1.0 / 60.0;

/// Movement speeds and interpolation for the locomotion integrator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Base speed in m/s
    pub base_speed: f64,
    /// Multiplier while walking
    pub walk_multiplier: f64,
    /// Multiplier while the run key is held
    pub run_multiplier: f64,
    /// Sphere radius for the metric → degree step, in meters
    pub earth_radius: f64,
    /// Position lerp factor per reference frame while walking, in (0, 1]
    pub walking_lerp: f64,
    /// Position lerp factor per reference frame while idle, in (0, 1]
    pub idle_lerp: f64,
    /// Targets are clamped to ±this latitude (degrees)
    pub max_latitude: f64,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_speed: 4.0,
            walk_multiplier: 1.0,
            run_multiplier: 2.0,
            earth_radius: 6_371_000.0,
            walking_lerp: 0.8,
            idle_lerp: 0.1,
            max_latitude: 89.5,
        }
    }
}

/// Mouse-look tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per pointer unit
    pub sensitivity: f64,
    /// Orientation lerp factor per reference frame, in (0, 1]
    pub smoothing: f64,
    /// Pitch stays inside (-π/2 + ε, π/2 - ε)
    pub pitch_epsilon: f64,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            smoothing: 0.35,
            pitch_epsilon: 0.01,
        }
    }
}

/// First-person camera placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye height above the avatar position along local up, in meters
    pub eye_height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { eye_height: 1.6 }
    }
}

/// Ejection and respawn offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Avatar spawns this far above the aircraft's last location (m)
    pub spawn_margin: f64,
    /// Aircraft respawns this far above the avatar (m)
    pub respawn_margin: f64,
    /// Heading of the respawned aircraft (degrees)
    pub respawn_heading: f64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            spawn_margin: 1.0,
            respawn_margin: 100.0,
            respawn_heading: 0.0,
        }
    }
}

/// Frame time clamping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Smallest accepted frame time (s)
    pub min_dt: f64,
    /// Largest accepted frame time (s); longer stalls are treated as this
    pub max_dt: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            min_dt: 0.0001,
            max_dt: 0.1,
        }
    }
}

/// Complete walk mode configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub locomotion: LocomotionConfig,
    pub look: LookConfig,
    pub camera: CameraConfig,
    pub lifecycle: LifecycleConfig,
    pub frame: FrameConfig,
    pub bindings: Vec<KeyBinding>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            look: LookConfig::default(),
            camera: CameraConfig::default(),
            lifecycle: LifecycleConfig::default(),
            frame: FrameConfig::default(),
            bindings: KeyBindings::default_pairs(),
        }
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not in (0, 1]")))
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite")))
    }
}

impl WalkConfig {
    /// Parse and validate a JSON config string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WalkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("loaded walk config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Key bindings built from the `bindings` list.
    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings::from_pairs(&self.bindings)
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.locomotion;
        check_positive("locomotion.base_speed", l.base_speed)?;
        check_positive("locomotion.walk_multiplier", l.walk_multiplier)?;
        check_positive("locomotion.run_multiplier", l.run_multiplier)?;
        check_positive("locomotion.earth_radius", l.earth_radius)?;
        check_unit_interval("locomotion.walking_lerp", l.walking_lerp)?;
        check_unit_interval("locomotion.idle_lerp", l.idle_lerp)?;
        if !(l.max_latitude > 0.0 && l.max_latitude < 90.0) {
            return Err(ConfigError::invalid(
                "locomotion.max_latitude",
                format!("{} is not in (0, 90)", l.max_latitude),
            ));
        }

        check_positive("look.sensitivity", self.look.sensitivity)?;
        check_unit_interval("look.smoothing", self.look.smoothing)?;
        let epsilon = self.look.pitch_epsilon;
        if !(epsilon > 0.0 && epsilon < std::f64::consts::FRAC_PI_2) {
            return Err(ConfigError::invalid(
                "look.pitch_epsilon",
                format!("{epsilon} is not in (0, π/2)"),
            ));
        }

        check_finite("camera.eye_height", self.camera.eye_height)?;
        check_finite("lifecycle.spawn_margin", self.lifecycle.spawn_margin)?;
        check_finite("lifecycle.respawn_margin", self.lifecycle.respawn_margin)?;
        check_finite("lifecycle.respawn_heading", self.lifecycle.respawn_heading)?;

        check_positive("frame.min_dt", self.frame.min_dt)?;
        check_positive("frame.max_dt", self.frame.max_dt)?;
        if self.frame.min_dt > self.frame.max_dt {
            return Err(ConfigError::invalid(
                "frame.min_dt",
                format!("{} exceeds frame.max_dt {}", self.frame.min_dt, self.frame.max_dt),
            ));
        }

        Ok(())
    }
}

/// Rescale a per-reference-frame lerp factor to an arbitrary frame time.
///
/// `1 - (1 - f)^(dt / REFERENCE_FRAME_DT)`: identical to `f` at 60 fps, and
/// the same convergence per second at any other rate.
pub fn frame_factor(factor: f64, dt: f64) -> f64 {
    if factor >= 1.0 {
        return 1.0;
    }
    if dt <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - factor).powf(dt / REFERENCE_FRAME_DT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, MoveAction};

    #[test]
    fn test_defaults_validate() {
        assert!(WalkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WalkConfig::from_json(r#"{ "locomotion": { "base_speed": 5.0 } }"#).unwrap();
        assert_eq!(config.locomotion.base_speed, 5.0);
        assert_eq!(config.locomotion.run_multiplier, 2.0);
        assert_eq!(config.look, LookConfig::default());
        assert_eq!(config.bindings, KeyBindings::default_pairs());
    }

    #[test]
    fn test_json_round_trip() {
        let config = WalkConfig::default();
        let parsed = WalkConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_smoothing_out_of_range() {
        let err = WalkConfig::from_json(r#"{ "look": { "smoothing": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "look.smoothing", .. }));

        let err = WalkConfig::from_json(r#"{ "locomotion": { "idle_lerp": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "locomotion.idle_lerp", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            WalkConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_custom_bindings() {
        let config = WalkConfig::from_json(
            r#"{ "bindings": [ { "key": "ArrowUp", "action": "Forward" } ] }"#,
        )
        .unwrap();
        let bindings = config.key_bindings();
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(MoveAction::Forward));
        assert_eq!(bindings.get_action(KeyCode::W), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = WalkConfig::load("/nonexistent/ground_walk.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_frame_factor() {
        assert!((frame_factor(0.8, REFERENCE_FRAME_DT) - 0.8).abs() < 1e-12);
        assert_eq!(frame_factor(1.0, 0.5), 1.0);
        assert_eq!(frame_factor(0.5, 0.0), 0.0);
        // Two half-frames equal one full frame
        let half = frame_factor(0.5, REFERENCE_FRAME_DT / 2.0);
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((combined - 0.5).abs() < 1e-12);
    }
}
