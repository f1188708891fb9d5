//! Local East-North-Up Frame
//!
//! Builds the tangent basis at a point on the globe. "Up" is the surface
//! normal under the avatar, not a fixed world axis, so the basis has to be
//! rebuilt every frame as the avatar moves.

use glam::DVec3;

use super::ellipsoid::surface_normal;

/// Below this length the `Z × up` cross product is treated as collapsed (pole).
const POLE_DEGENERACY_EPSILON: f64 = 1e-9;

/// Orthonormal east/north/up basis at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub east: DVec3,
    pub north: DVec3,
    pub up: DVec3,
}

impl LocalFrame {
    /// Build the local frame at an Earth-centred point.
    ///
    /// - `up` = outward ellipsoid normal
    /// - `east` = normalize(Z × up)
    /// - `north` = normalize(up × east)
    ///
    /// At the poles `Z × up` vanishes; east then falls back to +Y so the
    /// basis stays orthonormal and continuous in longitude 0.
    pub fn at(point: DVec3) -> Self {
        let up = surface_normal(point);
        let east_raw = DVec3::Z.cross(up);
        let east = if east_raw.length() < POLE_DEGENERACY_EPSILON {
            DVec3::Y
        } else {
            east_raw.normalize()
        };
        let north = up.cross(east).normalize();

        Self { east, north, up }
    }

    /// Whether the frame at this point needed the pole fallback.
    pub fn is_degenerate_at(point: DVec3) -> bool {
        DVec3::Z.cross(surface_normal(point)).length() < POLE_DEGENERACY_EPSILON
    }

    /// Transform an (east, north, up) vector into the world frame.
    #[inline]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.east * local.x + self.north * local.y + self.up * local.z
    }

    /// Project a world vector onto (east, north, up) components.
    #[inline]
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        DVec3::new(world.dot(self.east), world.dot(self.north), world.dot(self.up))
    }

    /// Horizontal (east, north) components of a heading-relative offset.
    ///
    /// `right` and `forward` are meters relative to a heading `yaw` (radians,
    /// 0 = north, increasing toward east). Returns `(east, north)`.
    #[inline]
    pub fn rotate_heading(yaw: f64, right: f64, forward: f64) -> (f64, f64) {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        (
            right * cos_yaw + forward * sin_yaw,
            -right * sin_yaw + forward * cos_yaw,
        )
    }

    /// World-space vector for an offset given relative to a heading.
    ///
    /// `offset` is (right, forward, up) in meters.
    pub fn heading_vector(&self, yaw: f64, offset: DVec3) -> DVec3 {
        let (east, north) = Self::rotate_heading(yaw, offset.x, offset.y);
        self.to_world(DVec3::new(east, north, offset.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeodeticPosition, to_cartesian};

    const TOLERANCE: f64 = 1e-9;

    fn assert_orthonormal(frame: &LocalFrame) {
        assert!((frame.east.length() - 1.0).abs() < TOLERANCE);
        assert!((frame.north.length() - 1.0).abs() < TOLERANCE);
        assert!((frame.up.length() - 1.0).abs() < TOLERANCE);
        assert!(frame.east.dot(frame.north).abs() < TOLERANCE);
        assert!(frame.east.dot(frame.up).abs() < TOLERANCE);
        assert!(frame.north.dot(frame.up).abs() < TOLERANCE);
    }

    #[test]
    fn test_frame_at_origin_meridian() {
        let frame = LocalFrame::at(to_cartesian(GeodeticPosition::new(0.0, 0.0, 0.0)));
        assert!((frame.up - DVec3::X).length() < TOLERANCE);
        assert!((frame.east - DVec3::Y).length() < TOLERANCE);
        assert!((frame.north - DVec3::Z).length() < TOLERANCE);
    }

    #[test]
    fn test_frame_orthonormal_across_globe() {
        for &lat in &[-80.0, -45.0, 0.0, 30.0, 60.0, 85.0] {
            for &lon in &[-179.0, -90.0, 0.0, 45.0, 179.0] {
                let p = to_cartesian(GeodeticPosition::new(lat, lon, 250.0));
                assert_orthonormal(&LocalFrame::at(p));
            }
        }
    }

    #[test]
    fn test_frame_is_right_handed() {
        let frame = LocalFrame::at(to_cartesian(GeodeticPosition::new(48.0, 11.0, 0.0)));
        assert!((frame.east.cross(frame.north) - frame.up).length() < TOLERANCE);
    }

    #[test]
    fn test_north_points_toward_pole() {
        let frame = LocalFrame::at(to_cartesian(GeodeticPosition::new(20.0, 70.0, 0.0)));
        assert!(frame.north.z > 0.0);
    }

    #[test]
    fn test_pole_fallback_stays_orthonormal() {
        let north_pole = to_cartesian(GeodeticPosition::new(90.0, 0.0, 0.0));
        let south_pole = to_cartesian(GeodeticPosition::new(-90.0, 0.0, 0.0));
        assert!(LocalFrame::is_degenerate_at(north_pole));
        assert!(LocalFrame::is_degenerate_at(south_pole));
        assert_orthonormal(&LocalFrame::at(north_pole));
        assert_orthonormal(&LocalFrame::at(south_pole));
    }

    #[test]
    fn test_rotate_heading_quarter_turn() {
        let (east, north) = LocalFrame::rotate_heading(std::f64::consts::FRAC_PI_2, 0.0, 1.0);
        assert!((east - 1.0).abs() < TOLERANCE);
        assert!(north.abs() < TOLERANCE);

        let (east, north) = LocalFrame::rotate_heading(0.0, 1.0, 0.0);
        assert!((east - 1.0).abs() < TOLERANCE);
        assert!(north.abs() < TOLERANCE);
    }

    #[test]
    fn test_to_local_inverts_to_world() {
        let frame = LocalFrame::at(to_cartesian(GeodeticPosition::new(-12.0, 33.0, 0.0)));
        let local = DVec3::new(1.5, -2.0, 0.25);
        assert!((frame.to_local(frame.to_world(local)) - local).length() < TOLERANCE);
    }
}
