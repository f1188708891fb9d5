//! Locomotion Integrator
//!
//! Kinematic target-seeking movement over the globe. Each frame:
//!
//! 1. Held keys form a 2D intent (right, forward), unit length on diagonals
//! 2. The intent is rotated by the look yaw into (east, north) meters
//! 3. The meters become a lat/lon step on a sphere and move the target
//! 4. The current position chases the target by exponential lerp
//!
//! There is no velocity state: the lerp chase is the only smoothing, and it
//! also absorbs abrupt target changes such as reversing direction. When no
//! key is held the target stays where it was last commanded and the avatar
//! settles onto it.
//!
//! # Usage
//!
//! ```rust,ignore
//! let integrator = LocomotionIntegrator::new(&LocomotionConfig::default());
//! let mut state = LocomotionState::at(spawn);
//!
//! // Each frame:
//! integrator.step(&mut state, &snapshot.movement, look.yaw, dt);
//! avatar.set_position(state.current);
//! ```

use glam::{DVec2, DVec3};

use crate::config::{LocomotionConfig, frame_factor};
use crate::geo::{GeodeticPosition, LocalFrame, to_cartesian, to_geodetic, wrap_longitude};
use crate::input::MovementKeys;

/// Position of the avatar: where it is drawn, and where it is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    /// Interpolated position; the only value written to the avatar transform
    pub current: DVec3,
    /// Last commanded position
    pub target: DVec3,
    pub is_walking: bool,
}

impl LocomotionState {
    /// Stand still at a geodetic position.
    pub fn at(position: GeodeticPosition) -> Self {
        let point = to_cartesian(position);
        Self {
            current: point,
            target: point,
            is_walking: false,
        }
    }

    pub fn current_geodetic(&self) -> GeodeticPosition {
        to_geodetic(self.current)
    }

    pub fn target_geodetic(&self) -> GeodeticPosition {
        to_geodetic(self.target)
    }

    /// Move both current and target, dropping any pending chase.
    pub fn teleport(&mut self, position: GeodeticPosition) {
        *self = Self::at(position);
    }

    /// Straight-line distance still to cover, in meters.
    pub fn remaining_distance(&self) -> f64 {
        self.current.distance(self.target)
    }
}

/// Result of one integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionStep {
    pub is_walking: bool,
    /// Metric (east, north) displacement commanded this frame
    pub commanded: DVec2,
    /// Distance the current position moved this frame (m)
    pub moved: f64,
}

/// Intent vector from held keys: x = right, y = forward.
///
/// Unit length whenever non-zero, so diagonals are no faster than cardinals.
pub fn intent_vector(keys: &MovementKeys) -> DVec2 {
    let intent = DVec2::new(keys.right_axis() as f64, keys.forward_axis() as f64);
    intent.normalize_or_zero()
}

#[derive(Debug, Clone)]
pub struct LocomotionIntegrator {
    config: LocomotionConfig,
}

impl Default for LocomotionIntegrator {
    fn default() -> Self {
        Self::new(&LocomotionConfig::default())
    }
}

impl LocomotionIntegrator {
    /// Lerp factors outside (0, 1] are clamped into it; zero or negative
    /// factors would freeze or diverge the chase.
    pub fn new(config: &LocomotionConfig) -> Self {
        let mut config = config.clone();
        config.walking_lerp = config.walking_lerp.clamp(f64::MIN_POSITIVE, 1.0);
        config.idle_lerp = config.idle_lerp.clamp(f64::MIN_POSITIVE, 1.0);
        Self { config }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Ground speed in m/s for the given run state.
    pub fn speed(&self, running: bool) -> f64 {
        let multiplier = if running {
            self.config.run_multiplier
        } else {
            self.config.walk_multiplier
        };
        self.config.base_speed * multiplier
    }

    /// Metric (east, north) displacement for this frame's input, or `None`
    /// when no direction key is held.
    pub fn displacement(&self, keys: &MovementKeys, yaw: f64, dt: f64) -> Option<DVec2> {
        let intent = intent_vector(keys);
        if intent == DVec2::ZERO {
            return None;
        }

        let distance = self.speed(keys.is_running()) * dt;
        let (east, north) = LocalFrame::rotate_heading(yaw, intent.x, intent.y);
        Some(DVec2::new(east, north) * distance)
    }

    /// Offset a geodetic position by metric (east, north) on a sphere.
    ///
    /// A step never carries |latitude| past `max_latitude`, but a position
    /// already beyond it (spawned or teleported there) is left where it is
    /// rather than pulled back. The longitude scale is capped at its
    /// `max_latitude` value so steps near the poles stay finite. Longitude
    /// wraps into [-180, 180).
    pub fn offset_geodetic(
        &self,
        from: GeodeticPosition,
        displacement: DVec2,
    ) -> GeodeticPosition {
        let radius = self.config.earth_radius;
        let max_lat = self.config.max_latitude;

        let delta_lat = (displacement.y / radius).to_degrees();
        let lon_scale = from.latitude_rad().cos().max(max_lat.to_radians().cos());
        let delta_lon = (displacement.x / (radius * lon_scale)).to_degrees();

        let limit = max_lat.max(from.latitude.abs()).min(90.0);
        GeodeticPosition::new(
            (from.latitude + delta_lat).clamp(-limit, limit),
            wrap_longitude(from.longitude + delta_lon),
            from.height,
        )
    }

    /// Advance the locomotion state by one frame.
    pub fn step(
        &self,
        state: &mut LocomotionState,
        keys: &MovementKeys,
        yaw: f64,
        dt: f64,
    ) -> LocomotionStep {
        let commanded = self.displacement(keys, yaw, dt);
        state.is_walking = commanded.is_some();

        if let Some(displacement) = commanded {
            let height = to_geodetic(state.current).height;
            let target = GeodeticPosition {
                height,
                ..to_geodetic(state.target)
            };
            state.target = to_cartesian(self.offset_geodetic(target, displacement));
        }

        let lerp = if state.is_walking {
            self.config.walking_lerp
        } else {
            self.config.idle_lerp
        };
        let previous = state.current;
        state.current = state.current.lerp(state.target, frame_factor(lerp, dt));

        LocomotionStep {
            is_walking: state.is_walking,
            commanded: commanded.unwrap_or(DVec2::ZERO),
            moved: previous.distance(state.current),
        }
    }
}
