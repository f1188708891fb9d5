//! Frame Clock
//!
//! Measures the real time between display refreshes so movement speed does
//! not drift with frame rate. The measured value is clamped: a zero-length
//! frame would stall the lerps and a long stall (debugger, tab switch) would
//! teleport the avatar.

use std::time::Instant;

use crate::config::{FrameConfig, REFERENCE_FRAME_DT};

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    min_dt: f64,
    max_dt: f64,
    /// Clamped frame time of the latest tick (s)
    pub dt: f64,
    /// Total clamped time since the first tick (s)
    pub elapsed: f64,
    /// Number of ticks so far
    pub frame_index: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(&FrameConfig::default())
    }
}

impl FrameClock {
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            last: None,
            min_dt: config.min_dt,
            max_dt: config.max_dt,
            dt: 0.0,
            elapsed: 0.0,
            frame_index: 0,
        }
    }

    /// Advance using the wall clock.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Advance to a given instant. The first tick has no predecessor and
    /// reports the nominal 1/60 s.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let raw = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => REFERENCE_FRAME_DT,
        };
        self.last = Some(now);
        self.dt = raw.clamp(self.min_dt, self.max_dt);
        self.elapsed += self.dt;
        self.frame_index += 1;
        self.dt
    }

    /// Forget the previous instant, e.g. after the walk mode was inactive.
    pub fn reset(&mut self) {
        self.last = None;
        self.dt = 0.0;
        self.elapsed = 0.0;
        self.frame_index = 0;
    }
}
