//! Walk Mode
//!
//! Owns the eject → walk → respawn lifecycle. While active it holds one
//! [`LocomotionSession`] and the avatar's visual rig; leaving the mode drops
//! both, so nothing from one walk leaks into the next.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut walk = WalkMode::new(WalkConfig::default());
//! walk.enter(&mut viewer, &mut scene, &mut camera)?;
//!
//! // Per event:
//! if walk.handle_event(event) == EventResponse::RequestPointerLock {
//!     window.set_cursor_grab(CursorGrabMode::Locked)?;
//! }
//!
//! // Per frame:
//! walk.frame(clock.tick(), &mut scene, &mut camera);
//!
//! walk.exit(&mut viewer, &mut scene);
//! ```

use crate::config::WalkConfig;
use crate::error::WalkModeError;
use crate::geo::GeodeticPosition;
use crate::input::InputEvent;
use crate::player::{AvatarRig, human_parts};

use super::{AircraftHost, CameraSink, FrameOutput, LocomotionSession, SceneHost};

/// Message shown when walking is requested with nothing to eject from.
pub const NO_AIRCRAFT_MESSAGE: &str = "No aircraft found! Spawn an aircraft first.";

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Walk mode is inactive or the event was not relevant
    Ignored,
    Consumed,
    /// The view was clicked without pointer lock; the host should request it
    RequestPointerLock,
}

/// Result of [`WalkMode::toggle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeChange {
    /// Now walking, standing at this position
    Entered(GeodeticPosition),
    /// Back in the aircraft; the avatar's last position
    Exited(GeodeticPosition),
}

#[derive(Debug)]
struct ActiveWalk {
    session: LocomotionSession,
    rig: AvatarRig,
}

#[derive(Debug)]
pub struct WalkMode {
    config: WalkConfig,
    active: Option<ActiveWalk>,
}

impl Default for WalkMode {
    fn default() -> Self {
        Self::new(WalkConfig::default())
    }
}

impl WalkMode {
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn session(&self) -> Option<&LocomotionSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    /// Handles of the avatar parts currently in the scene.
    pub fn rig(&self) -> Option<&AvatarRig> {
        self.active.as_ref().map(|a| &a.rig)
    }

    /// Eject from the active aircraft and start walking.
    ///
    /// The avatar appears `spawn_margin` above the aircraft, the aircraft is
    /// removed, and the camera switches to first person. With no aircraft the
    /// user is notified and nothing changes.
    pub fn enter(
        &mut self,
        aircraft: &mut dyn AircraftHost,
        scene: &mut dyn SceneHost,
        camera: &mut dyn CameraSink,
    ) -> Result<GeodeticPosition, WalkModeError> {
        if self.active.is_some() {
            return Err(WalkModeError::AlreadyActive);
        }

        let Some(location) = aircraft.active_aircraft() else {
            log::warn!("walk mode requested with no active aircraft");
            aircraft.notify_user(NO_AIRCRAFT_MESSAGE);
            return Err(WalkModeError::NoActiveVehicle);
        };

        let spawn = location.raised(self.config.lifecycle.spawn_margin);
        let session = LocomotionSession::new(&self.config, spawn);
        let rig = AvatarRig::spawn(
            scene,
            human_parts(),
            session.state().current,
            session.look().yaw,
        )?;

        aircraft.remove_active_aircraft();
        camera.set_view(&session.current_pose());

        log::info!(
            "entered walk mode at lat {:.6}, lon {:.6}, height {:.1} m",
            spawn.latitude,
            spawn.longitude,
            spawn.height
        );

        self.active = Some(ActiveWalk { session, rig });
        Ok(spawn)
    }

    /// Stop walking and respawn an aircraft above the avatar.
    ///
    /// Returns the avatar's last position, or `None` if the mode was not
    /// active.
    pub fn exit(
        &mut self,
        aircraft: &mut dyn AircraftHost,
        scene: &mut dyn SceneHost,
    ) -> Option<GeodeticPosition> {
        let ActiveWalk { session, rig } = self.active.take()?;

        let last = session.position();
        let parts = rig.len();
        let removed = rig.despawn(scene);
        if removed != parts {
            log::warn!("removed {removed} of {parts} avatar parts");
        }

        let lifecycle = &self.config.lifecycle;
        aircraft.spawn_aircraft(last.raised(lifecycle.respawn_margin), lifecycle.respawn_heading);

        log::info!(
            "exited walk mode at lat {:.6}, lon {:.6} after {:.1} s",
            last.latitude,
            last.longitude,
            session.elapsed()
        );
        Some(last)
    }

    /// Enter if inactive, exit if active.
    pub fn toggle(
        &mut self,
        aircraft: &mut dyn AircraftHost,
        scene: &mut dyn SceneHost,
        camera: &mut dyn CameraSink,
    ) -> Result<ModeChange, WalkModeError> {
        match self.exit(aircraft, scene) {
            Some(last) => Ok(ModeChange::Exited(last)),
            None => self.enter(aircraft, scene, camera).map(ModeChange::Entered),
        }
    }

    /// Route one raw input event to the session.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        let Some(active) = self.active.as_mut() else {
            return EventResponse::Ignored;
        };

        if event == InputEvent::Click && !active.session.is_pointer_locked() {
            return EventResponse::RequestPointerLock;
        }

        if active.session.handle_event(event) {
            EventResponse::Consumed
        } else {
            EventResponse::Ignored
        }
    }

    /// Run one frame: integrate, move the rig and push the camera pose.
    pub fn frame(
        &mut self,
        dt: f64,
        scene: &mut dyn SceneHost,
        camera: &mut dyn CameraSink,
    ) -> Option<FrameOutput> {
        let active = self.active.as_mut()?;
        let output = active.session.update(dt);

        let failures = active.rig.publish(
            scene,
            output.position,
            &output.frame,
            output.look.yaw,
            active.session.walk_phase(),
        );
        if failures > 0 {
            log::debug!("{failures} avatar parts could not be moved");
        }

        camera.set_view(&output.pose);
        Some(output)
    }

    pub fn avatar_position(&self) -> Option<GeodeticPosition> {
        self.session().map(LocomotionSession::position)
    }

    /// Place the avatar directly. Returns `false` when not walking.
    pub fn set_avatar_position(&mut self, position: GeodeticPosition) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                active.session.set_position(position);
                true
            }
            None => false,
        }
    }
}
