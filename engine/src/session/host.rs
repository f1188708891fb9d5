//! Host Collaborators
//!
//! The walk mode never talks to a renderer, a UI or a flight model directly.
//! The embedding viewer implements these traits.

use glam::DVec3;

use crate::camera::CameraPose;
use crate::error::SceneError;
use crate::geo::GeodeticPosition;
use crate::player::PartDescriptor;

/// Opaque handle to a visual part created by a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartHandle(pub u64);

/// The flight simulator's aircraft API.
pub trait AircraftHost {
    /// Location of the aircraft the user would eject from, if any.
    fn active_aircraft(&self) -> Option<GeodeticPosition>;

    /// Hide and detach the active aircraft.
    fn remove_active_aircraft(&mut self);

    /// Place a new aircraft.
    fn spawn_aircraft(&mut self, location: GeodeticPosition, heading_deg: f64);

    /// Show a message to the user.
    fn notify_user(&mut self, message: &str);
}

/// Entity management for the avatar's visual parts.
pub trait SceneHost {
    fn spawn_part(
        &mut self,
        descriptor: &PartDescriptor,
        position: DVec3,
    ) -> Result<PartHandle, SceneError>;

    fn move_part(&mut self, handle: PartHandle, position: DVec3) -> Result<(), SceneError>;

    fn remove_part(&mut self, handle: PartHandle) -> Result<(), SceneError>;
}

/// Receives the camera pose once per frame.
pub trait CameraSink {
    fn set_view(&mut self, pose: &CameraPose);
}
