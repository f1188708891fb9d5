//! Locomotion Session
//!
//! All per-frame state of one walk, from ejection to respawn. Nothing here
//! outlives the session, and `update` is a function of (session, input, dt)
//! only.
//!
//! Frame order is fixed: input snapshot → orientation → locomotion → camera.
//! Movement direction uses this frame's smoothed yaw, and the camera tracks
//! the position that was just integrated.

use glam::DVec3;

use crate::camera::{CameraPose, CameraPoseResolver, LookOrientation, OrientationSmoother};
use crate::config::WalkConfig;
use crate::geo::{GeodeticPosition, LocalFrame};
use crate::input::{InputEvent, InputSampler, InputSnapshot};
use crate::player::{LocomotionIntegrator, LocomotionState, LocomotionStep};

/// Everything produced by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub pose: CameraPose,
    /// Local frame at the avatar's current position
    pub frame: LocalFrame,
    pub look: LookOrientation,
    pub step: LocomotionStep,
    /// Avatar position after this frame
    pub position: DVec3,
    pub input: InputSnapshot,
}

#[derive(Debug, Clone)]
pub struct LocomotionSession {
    input: InputSampler,
    smoother: OrientationSmoother,
    integrator: LocomotionIntegrator,
    resolver: CameraPoseResolver,
    state: LocomotionState,
    /// Seconds since the session started
    elapsed: f64,
    /// Seconds spent walking, drives the leg swing
    walk_time: f64,
    frames: u64,
}

impl LocomotionSession {
    /// Start a session standing at `spawn`, looking north and level.
    pub fn new(config: &WalkConfig, spawn: GeodeticPosition) -> Self {
        Self {
            input: InputSampler::new(config.key_bindings()),
            smoother: OrientationSmoother::new(&config.look),
            integrator: LocomotionIntegrator::new(&config.locomotion),
            resolver: CameraPoseResolver::new(&config.camera),
            state: LocomotionState::at(spawn),
            elapsed: 0.0,
            walk_time: 0.0,
            frames: 0,
        }
    }

    /// Feed one raw input event. Only the pending input buffer changes.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        self.input.handle_event(event)
    }

    /// Run one frame of `dt` seconds.
    pub fn update(&mut self, dt: f64) -> FrameOutput {
        let input = self.input.snapshot();

        let (dx, dy) = input.look_delta;
        self.smoother.apply_pointer_delta(dx, dy);
        let look = self.smoother.update(dt);

        let step = self
            .integrator
            .step(&mut self.state, &input.movement, look.yaw, dt);

        let frame = LocalFrame::at(self.state.current);
        let pose = self.resolver.resolve_in_frame(self.state.current, &frame, look);

        self.elapsed += dt;
        if step.is_walking {
            self.walk_time += dt;
        }
        self.frames += 1;

        log::trace!(
            "frame {}: walking={} moved={:.4}m yaw={:.3} pitch={:.3}",
            self.frames,
            step.is_walking,
            step.moved,
            look.yaw,
            look.pitch
        );

        FrameOutput {
            pose,
            frame,
            look,
            step,
            position: self.state.current,
            input,
        }
    }

    /// Camera pose for the current state without advancing time.
    pub fn current_pose(&self) -> CameraPose {
        self.resolver.resolve(self.state.current, self.smoother.look())
    }

    /// Avatar's interpolated position.
    pub fn position(&self) -> GeodeticPosition {
        self.state.current_geodetic()
    }

    /// Place the avatar, dropping any pending movement.
    pub fn set_position(&mut self, position: GeodeticPosition) {
        self.state.teleport(position);
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn look(&self) -> LookOrientation {
        self.smoother.look()
    }

    pub fn smoother(&self) -> &OrientationSmoother {
        &self.smoother
    }

    pub fn is_walking(&self) -> bool {
        self.state.is_walking
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.input.is_pointer_locked()
    }

    /// Walk cycle phase for the leg swing, `None` while standing.
    pub fn walk_phase(&self) -> Option<f64> {
        self.state.is_walking.then_some(self.walk_time)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFERENCE_FRAME_DT;
    use crate::input::KeyCode;

    const DT: f64 = REFERENCE_FRAME_DT;

    fn session() -> LocomotionSession {
        LocomotionSession::new(&WalkConfig::default(), GeodeticPosition::new(0.0, 0.0, 100.0))
    }

    #[test]
    fn test_new_session_stands_at_spawn() {
        let s = session();
        let p = s.position();
        assert!(p.latitude.abs() < 1e-12);
        assert!((p.height - 100.0).abs() < 1e-6);
        assert!(!s.is_walking());
        assert_eq!(s.walk_phase(), None);
    }

    #[test]
    fn test_pointer_turn_changes_walk_direction() {
        let mut s = session();
        s.handle_event(InputEvent::PointerLockChanged(true));
        // 785.4 * 0.002 ≈ π/2: turn to face east
        s.handle_event(InputEvent::PointerMove { dx: 785.398_163_397, dy: 0.0 });
        for _ in 0..120 {
            s.update(DT);
        }
        s.handle_event(InputEvent::KeyDown(KeyCode::W));
        for _ in 0..60 {
            s.update(DT);
        }
        let p = s.state().target_geodetic();
        assert!(p.longitude > 0.0);
        assert!(p.latitude.abs() < 1e-9);
    }

    #[test]
    fn test_camera_tracks_new_position() {
        let mut s = session();
        s.handle_event(InputEvent::KeyDown(KeyCode::W));
        let out = s.update(DT);
        let expected = out.position + out.frame.up * 1.6;
        assert!((out.pose.position - expected).length() < 1e-9);
    }

    #[test]
    fn test_walk_phase_advances_only_while_walking() {
        let mut s = session();
        s.update(DT);
        assert_eq!(s.walk_phase(), None);

        s.handle_event(InputEvent::KeyDown(KeyCode::W));
        s.update(DT);
        s.update(DT);
        let phase = s.walk_phase().unwrap();
        assert!((phase - 2.0 * DT).abs() < 1e-12);
        assert!((s.elapsed() - 3.0 * DT).abs() < 1e-12);
        assert_eq!(s.frames(), 3);
    }

    #[test]
    fn test_set_position_teleports() {
        let mut s = session();
        s.handle_event(InputEvent::KeyDown(KeyCode::W));
        s.update(DT);
        s.set_position(GeodeticPosition::new(5.0, 5.0, 0.0));
        assert!((s.position().latitude - 5.0).abs() < 1e-9);
        assert_eq!(s.state().remaining_distance(), 0.0);
    }
}
