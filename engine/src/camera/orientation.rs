//! Look Orientation Smoother
//!
//! Mouse-look for the walking avatar. Pointer deltas move a *target*
//! yaw/pitch immediately; once per frame the actual yaw/pitch chase the
//! target exponentially. Pointer events and render frames are not
//! synchronized, so the target absorbs input jitter while the chase keeps the
//! view smooth.
//!
//! Key features:
//! - Configurable sensitivity (default: 0.002 rad/unit)
//! - Pitch clamped to (-π/2 + ε, π/2 - ε), no flips
//! - Yaw unbounded, wraps through sin/cos downstream

use std::f64::consts::FRAC_PI_2;

use crate::config::{LookConfig, frame_factor};

/// Heading and elevation relative to the local horizon.
///
/// - `yaw`: radians about local up, 0 = north, increasing toward east
/// - `pitch`: radians above (+) or below (-) the local horizontal plane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookOrientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl LookOrientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// Target/current pair per axis with exponential chase.
#[derive(Clone, Debug)]
pub struct OrientationSmoother {
    /// Input-driven target yaw (radians)
    target_yaw: f64,
    /// Input-driven target pitch (radians), always clamped
    target_pitch: f64,
    /// Smoothed yaw (radians)
    yaw: f64,
    /// Smoothed pitch (radians)
    pitch: f64,
    /// Radians per pointer unit
    sensitivity: f64,
    /// Lerp factor per reference frame, in (0, 1]
    smoothing: f64,
    /// Pitch limits (min, max) in radians
    pitch_limits: (f64, f64),
}

impl Default for OrientationSmoother {
    fn default() -> Self {
        Self::new(&LookConfig::default())
    }
}

impl OrientationSmoother {
    pub fn new(config: &LookConfig) -> Self {
        let limit = FRAC_PI_2 - config.pitch_epsilon;
        Self {
            target_yaw: 0.0,
            target_pitch: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            smoothing: config.smoothing.clamp(f64::MIN_POSITIVE, 1.0),
            pitch_limits: (-limit, limit),
        }
    }

    /// Start looking in a given direction with no pending chase.
    pub fn with_orientation(config: &LookConfig, look: LookOrientation) -> Self {
        let mut smoother = Self::new(config);
        smoother.snap_to(look);
        smoother
    }

    /// Apply a pointer delta to the target orientation.
    ///
    /// * `dx` - Positive = pointer moved right = turn right (yaw increases)
    /// * `dy` - Positive = pointer moved down = look down (pitch decreases)
    pub fn apply_pointer_delta(&mut self, dx: f64, dy: f64) {
        self.target_yaw += dx * self.sensitivity;
        self.target_pitch -= dy * self.sensitivity;
        self.target_pitch = self.clamp_pitch(self.target_pitch);
    }

    /// Advance the smoothed orientation toward the target by one frame.
    pub fn update(&mut self, dt: f64) -> LookOrientation {
        let t = frame_factor(self.smoothing, dt);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        // Both ends are clamped so the lerp already is; this guards float drift.
        self.pitch = self.clamp_pitch(self.pitch);
        self.look()
    }

    /// Current smoothed orientation.
    #[inline]
    pub fn look(&self) -> LookOrientation {
        LookOrientation::new(self.yaw, self.pitch)
    }

    /// Orientation the smoother is converging on.
    #[inline]
    pub fn target(&self) -> LookOrientation {
        LookOrientation::new(self.target_yaw, self.target_pitch)
    }

    /// Set both target and current orientation, skipping the chase.
    pub fn snap_to(&mut self, look: LookOrientation) {
        self.target_yaw = look.yaw;
        self.yaw = look.yaw;
        self.target_pitch = self.clamp_pitch(look.pitch);
        self.pitch = self.target_pitch;
    }

    /// Get the pitch limits in radians (min, max)
    #[inline]
    pub fn pitch_limits(&self) -> (f64, f64) {
        self.pitch_limits
    }

    #[inline]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    #[inline]
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    #[inline]
    fn clamp_pitch(&self, pitch: f64) -> f64 {
        pitch.clamp(self.pitch_limits.0, self.pitch_limits.1)
    }
}
