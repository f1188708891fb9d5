//! Avatar Rig
//!
//! The walking figure is a group of simple primitives (body, head, arms,
//! legs, name label) placed by the host's scene. The rig keeps their handles,
//! places every part relative to the avatar position each frame, and removes
//! them all on exit.
//!
//! Part offsets are (right, forward, up) meters in the avatar's heading
//! frame, so the figure stays upright on the curved surface and turns with
//! the view.

use glam::DVec3;

use crate::error::SceneError;
use crate::geo::LocalFrame;
use crate::session::{PartHandle, SceneHost};

/// Leg swing frequency in radians per second
pub const WALK_CYCLE_RATE: f64 = 10.0;

/// Leg swing amplitude along the heading, in meters
pub const WALK_CYCLE_AMPLITUDE: f64 = 0.1;

pub const LABEL_TEXT: &str = "YOU (HUMAN)";

const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const DARK_BLUE: [f32; 4] = [0.0, 0.0, 0.545, 1.0];
const PEACH_PUFF: [f32; 4] = [1.0, 0.855, 0.725, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarPart {
    Body,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartShape {
    Cylinder {
        length: f64,
        top_radius: f64,
        bottom_radius: f64,
    },
    Ellipsoid {
        radii: DVec3,
    },
    Label {
        text: String,
        /// Screen-space offset in pixels
        pixel_offset: (f32, f32),
    },
}

/// Everything a scene host needs to create one part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartDescriptor {
    pub part: AvatarPart,
    pub shape: PartShape,
    /// Fill color, linear RGBA
    pub color: [f32; 4],
    pub outline: Option<[f32; 4]>,
    /// (right, forward, up) offset from the avatar position, meters
    pub offset: DVec3,
}

fn cylinder(length: f64, top_radius: f64, bottom_radius: f64) -> PartShape {
    PartShape::Cylinder {
        length,
        top_radius,
        bottom_radius,
    }
}

/// The default human figure.
pub fn human_parts() -> Vec<PartDescriptor> {
    vec![
        PartDescriptor {
            part: AvatarPart::Body,
            shape: cylinder(3.0, 0.6, 0.8),
            color: BLUE,
            outline: Some(WHITE),
            offset: DVec3::ZERO,
        },
        PartDescriptor {
            part: AvatarPart::Head,
            shape: PartShape::Ellipsoid {
                radii: DVec3::new(0.4, 0.4, 0.5),
            },
            color: PEACH_PUFF,
            outline: Some(BLACK),
            offset: DVec3::new(0.0, 0.0, 2.5),
        },
        PartDescriptor {
            part: AvatarPart::LeftArm,
            shape: cylinder(2.0, 0.2, 0.2),
            color: PEACH_PUFF,
            outline: Some(BLACK),
            offset: DVec3::new(-1.0, 0.0, 1.0),
        },
        PartDescriptor {
            part: AvatarPart::RightArm,
            shape: cylinder(2.0, 0.2, 0.2),
            color: PEACH_PUFF,
            outline: Some(BLACK),
            offset: DVec3::new(1.0, 0.0, 1.0),
        },
        PartDescriptor {
            part: AvatarPart::LeftLeg,
            shape: cylinder(2.5, 0.25, 0.25),
            color: DARK_BLUE,
            outline: Some(WHITE),
            offset: DVec3::new(-0.3, 0.0, -2.0),
        },
        PartDescriptor {
            part: AvatarPart::RightLeg,
            shape: cylinder(2.5, 0.25, 0.25),
            color: DARK_BLUE,
            outline: Some(WHITE),
            offset: DVec3::new(0.3, 0.0, -2.0),
        },
        PartDescriptor {
            part: AvatarPart::Label,
            shape: PartShape::Label {
                text: LABEL_TEXT.to_string(),
                pixel_offset: (0.0, -120.0),
            },
            color: YELLOW,
            outline: Some(BLACK),
            offset: DVec3::ZERO,
        },
    ]
}

/// Forward leg offset for a walk phase (elapsed seconds while walking).
#[inline]
pub fn leg_swing(walk_phase: Option<f64>) -> f64 {
    walk_phase.map_or(0.0, |t| (t * WALK_CYCLE_RATE).sin() * WALK_CYCLE_AMPLITUDE)
}

/// World position of one part.
pub fn part_position(
    descriptor: &PartDescriptor,
    avatar: DVec3,
    frame: &LocalFrame,
    yaw: f64,
    swing: f64,
) -> DVec3 {
    let mut offset = descriptor.offset;
    match descriptor.part {
        AvatarPart::LeftLeg => offset.y += swing,
        AvatarPart::RightLeg => offset.y -= swing,
        _ => {}
    }
    avatar + frame.heading_vector(yaw, offset)
}

/// Live handles for one spawned figure.
#[derive(Debug)]
pub struct AvatarRig {
    parts: Vec<(PartDescriptor, PartHandle)>,
}

impl AvatarRig {
    /// Create every part at the avatar position.
    ///
    /// If the host rejects a part, the parts already created are removed
    /// again and the error is returned, leaving the scene as it was.
    pub fn spawn(
        scene: &mut dyn SceneHost,
        descriptors: Vec<PartDescriptor>,
        avatar: DVec3,
        yaw: f64,
    ) -> Result<Self, SceneError> {
        let frame = LocalFrame::at(avatar);
        let mut parts = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let position = part_position(&descriptor, avatar, &frame, yaw, 0.0);
            match scene.spawn_part(&descriptor, position) {
                Ok(handle) => parts.push((descriptor, handle)),
                Err(err) => {
                    log::warn!("avatar part {:?} rejected: {err}", descriptor.part);
                    Self { parts }.despawn(scene);
                    return Err(err);
                }
            }
        }

        log::debug!("spawned avatar rig with {} parts", parts.len());
        Ok(Self { parts })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = PartHandle> + '_ {
        self.parts.iter().map(|(_, handle)| *handle)
    }

    /// Move every part to follow the avatar. `walk_phase` is the elapsed
    /// walking time, `None` when standing.
    ///
    /// Returns the number of parts the host failed to move.
    pub fn publish(
        &self,
        scene: &mut dyn SceneHost,
        avatar: DVec3,
        frame: &LocalFrame,
        yaw: f64,
        walk_phase: Option<f64>,
    ) -> usize {
        let swing = leg_swing(walk_phase);
        let mut failures = 0;
        for (descriptor, handle) in &self.parts {
            let position = part_position(descriptor, avatar, frame, yaw, swing);
            if let Err(err) = scene.move_part(*handle, position) {
                log::debug!("failed to move avatar part {:?}: {err}", descriptor.part);
                failures += 1;
            }
        }
        failures
    }

    /// Remove every part. Failures (part already gone) are logged and
    /// skipped; returns how many parts were removed.
    pub fn despawn(self, scene: &mut dyn SceneHost) -> usize {
        let mut removed = 0;
        for (descriptor, handle) in self.parts {
            match scene.remove_part(handle) {
                Ok(()) => removed += 1,
                Err(err) => log::warn!("error removing avatar part {:?}: {err}", descriptor.part),
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeodeticPosition, to_cartesian};

    #[test]
    fn test_human_has_seven_parts() {
        let parts = human_parts();
        assert_eq!(parts.len(), 7);
        assert_eq!(parts[0].part, AvatarPart::Body);
        assert!(matches!(parts[6].shape, PartShape::Label { .. }));
    }

    #[test]
    fn test_head_is_above_along_local_up() {
        let avatar = to_cartesian(GeodeticPosition::new(40.0, -3.0, 600.0));
        let frame = LocalFrame::at(avatar);
        let head = &human_parts()[1];

        let position = part_position(head, avatar, &frame, 1.2, 0.0);
        let offset = position - avatar;
        assert!((offset.dot(frame.up) - 2.5).abs() < 1e-9);
        assert!((offset.length() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_right_arm_follows_heading() {
        let avatar = to_cartesian(GeodeticPosition::new(0.0, 0.0, 0.0));
        let frame = LocalFrame::at(avatar);
        let right_arm = &human_parts()[3];

        // Facing east, right is south
        let position = part_position(right_arm, avatar, &frame, std::f64::consts::FRAC_PI_2, 0.0);
        let local = frame.to_local(position - avatar);
        assert!(local.x.abs() < 1e-9);
        assert!((local.y + 1.0).abs() < 1e-9);
        assert!((local.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_legs_swing_in_opposition() {
        let avatar = to_cartesian(GeodeticPosition::new(0.0, 0.0, 0.0));
        let frame = LocalFrame::at(avatar);
        let parts = human_parts();
        let swing = leg_swing(Some(0.15));
        assert!(swing.abs() > 0.0 && swing.abs() <= WALK_CYCLE_AMPLITUDE);

        let left = frame.to_local(part_position(&parts[4], avatar, &frame, 0.0, swing) - avatar);
        let right = frame.to_local(part_position(&parts[5], avatar, &frame, 0.0, swing) - avatar);
        assert!((left.y - swing).abs() < 1e-9);
        assert!((right.y + swing).abs() < 1e-9);
    }

    #[test]
    fn test_standing_has_no_swing() {
        assert_eq!(leg_swing(None), 0.0);
    }
}
