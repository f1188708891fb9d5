//! In-memory host used by the headless simulator and tests.
//!
//! Records every call so a run can be inspected afterwards: which parts
//! exist, how often they were moved, which aircraft were spawned, and the
//! last camera pose.

use std::collections::BTreeMap;

use glam::DVec3;

use crate::camera::CameraPose;
use crate::error::SceneError;
use crate::geo::GeodeticPosition;
use crate::player::{AvatarPart, PartDescriptor};

use super::{AircraftHost, CameraSink, PartHandle, SceneHost};

/// A part currently in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePart {
    pub part: AvatarPart,
    pub position: DVec3,
    pub moves: u64,
}

/// An aircraft placed through [`AircraftHost::spawn_aircraft`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftSpawn {
    pub location: GeodeticPosition,
    pub heading_deg: f64,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    aircraft: Option<GeodeticPosition>,
    next_handle: u64,
    /// Reject the part spawn after this many successful ones
    spawn_limit: Option<usize>,
    pub parts: BTreeMap<PartHandle, LivePart>,
    pub removed: Vec<PartHandle>,
    pub aircraft_spawns: Vec<AircraftSpawn>,
    pub aircraft_removals: usize,
    pub notifications: Vec<String>,
    pub last_view: Option<CameraPose>,
    pub view_updates: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with an active aircraft at `location`.
    pub fn with_aircraft(location: GeodeticPosition) -> Self {
        Self {
            aircraft: Some(location),
            ..Self::default()
        }
    }

    /// Make the scene reject part spawns once `limit` parts have been created.
    pub fn with_spawn_limit(mut self, limit: usize) -> Self {
        self.spawn_limit = Some(limit);
        self
    }

    pub fn aircraft(&self) -> Option<GeodeticPosition> {
        self.aircraft
    }

    pub fn part_position(&self, handle: PartHandle) -> Option<DVec3> {
        self.parts.get(&handle).map(|p| p.position)
    }

    /// Live handle of the first part of the given kind.
    pub fn find_part(&self, part: AvatarPart) -> Option<PartHandle> {
        self.parts
            .iter()
            .find(|(_, live)| live.part == part)
            .map(|(handle, _)| *handle)
    }

    fn spawned_count(&self) -> usize {
        self.parts.len() + self.removed.len()
    }
}

impl AircraftHost for MemoryHost {
    fn active_aircraft(&self) -> Option<GeodeticPosition> {
        self.aircraft
    }

    fn remove_active_aircraft(&mut self) {
        if self.aircraft.take().is_some() {
            self.aircraft_removals += 1;
        }
    }

    fn spawn_aircraft(&mut self, location: GeodeticPosition, heading_deg: f64) {
        self.aircraft_spawns.push(AircraftSpawn {
            location,
            heading_deg,
        });
        self.aircraft = Some(location);
    }

    fn notify_user(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

impl SceneHost for MemoryHost {
    fn spawn_part(
        &mut self,
        descriptor: &PartDescriptor,
        position: DVec3,
    ) -> Result<PartHandle, SceneError> {
        if self.spawn_limit.is_some_and(|limit| self.spawned_count() >= limit) {
            return Err(SceneError::Rejected(format!(
                "part limit reached for {:?}",
                descriptor.part
            )));
        }

        let handle = PartHandle(self.next_handle);
        self.next_handle += 1;
        self.parts.insert(
            handle,
            LivePart {
                part: descriptor.part,
                position,
                moves: 0,
            },
        );
        Ok(handle)
    }

    fn move_part(&mut self, handle: PartHandle, position: DVec3) -> Result<(), SceneError> {
        let live = self
            .parts
            .get_mut(&handle)
            .ok_or(SceneError::UnknownPart(handle))?;
        live.position = position;
        live.moves += 1;
        Ok(())
    }

    fn remove_part(&mut self, handle: PartHandle) -> Result<(), SceneError> {
        self.parts
            .remove(&handle)
            .ok_or(SceneError::UnknownPart(handle))?;
        self.removed.push(handle);
        Ok(())
    }
}

impl CameraSink for MemoryHost {
    fn set_view(&mut self, pose: &CameraPose) {
        self.last_view = Some(*pose);
        self.view_updates += 1;
    }
}
