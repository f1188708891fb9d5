//! Camera Pose Resolver
//!
//! Eye-level first-person camera on a curved world. The look direction is
//! built in the local east-north-up frame under the avatar and the camera's
//! up vector is the local surface normal, so the horizon stays level relative
//! to the ground at any latitude.

use glam::DVec3;

use super::LookOrientation;
use crate::config::CameraConfig;
use crate::geo::LocalFrame;

/// World-space camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position (Earth-centred, meters)
    pub position: DVec3,
    /// Unit look direction
    pub direction: DVec3,
    /// Unit up vector, the local surface normal
    pub up: DVec3,
    /// Unit horizontal right vector for the current heading
    pub right: DVec3,
}

/// Direction for a yaw/pitch pair in (east, north, up) components.
#[inline]
pub fn local_look_direction(look: LookOrientation) -> DVec3 {
    let (sin_yaw, cos_yaw) = look.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = look.pitch.sin_cos();
    DVec3::new(sin_yaw * cos_pitch, cos_yaw * cos_pitch, sin_pitch)
}

#[derive(Debug, Clone)]
pub struct CameraPoseResolver {
    eye_height: f64,
}

impl Default for CameraPoseResolver {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl CameraPoseResolver {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            eye_height: config.eye_height,
        }
    }

    pub fn eye_height(&self) -> f64 {
        self.eye_height
    }

    /// Resolve the camera pose for an avatar at `avatar` looking along `look`.
    pub fn resolve(&self, avatar: DVec3, look: LookOrientation) -> CameraPose {
        let frame = LocalFrame::at(avatar);
        self.resolve_in_frame(avatar, &frame, look)
    }

    /// Same as [`resolve`](Self::resolve) with a frame the caller already built.
    pub fn resolve_in_frame(
        &self,
        avatar: DVec3,
        frame: &LocalFrame,
        look: LookOrientation,
    ) -> CameraPose {
        let direction = frame.to_world(local_look_direction(look)).normalize();
        let right = frame.heading_vector(look.yaw, DVec3::X);

        CameraPose {
            position: avatar + frame.up * self.eye_height,
            direction,
            up: frame.up,
            right,
        }
    }
}
