//! WGS84 Ellipsoid Module
//!
//! Converts between geodetic coordinates (latitude, longitude, height) and
//! Earth-centred, Earth-fixed Cartesian points.
//!
//! ## Frame
//! - +X = intersection of equator and prime meridian
//! - +Y = equator at 90°E
//! - +Z = north pole
//! - 1 unit = 1 meter
//!
//! Everything here is `f64`: at Earth radius an `f32` only resolves ~0.5m,
//! which is visible jitter for a walking avatar.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// WGS84 semi-major axis (equatorial radius) in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// WGS84 semi-minor axis (polar radius) in meters
pub const WGS84_SEMI_MINOR_AXIS: f64 = WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_FLATTENING);

/// First eccentricity squared: f * (2 - f)
pub const WGS84_ECCENTRICITY_SQ: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

/// Iteration cap for the latitude fixed-point solve in [`to_geodetic`].
const MAX_LATITUDE_ITERATIONS: usize = 16;

/// Convergence threshold for the latitude solve, in radians (~6e-7 mm on the ground).
const LATITUDE_TOLERANCE: f64 = 1e-13;

/// A point relative to the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Height above the ellipsoid in meters
    pub height: f64,
}

impl GeodeticPosition {
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            latitude,
            longitude,
            height,
        }
    }

    /// Same horizontal location, raised (or lowered) by `meters`.
    pub fn raised(self, meters: f64) -> Self {
        Self {
            height: self.height + meters,
            ..self
        }
    }

    /// Latitude in radians
    #[inline]
    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians
    #[inline]
    pub fn longitude_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Convert to an Earth-centred Cartesian point. See [`to_cartesian`].
    #[inline]
    pub fn to_cartesian(&self) -> DVec3 {
        to_cartesian(*self)
    }
}

/// Prime vertical radius of curvature at a latitude (radians).
#[inline]
fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_SEMI_MAJOR_AXIS / (1.0 - WGS84_ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt()
}

/// Convert a geodetic position to an Earth-centred Cartesian point.
pub fn to_cartesian(position: GeodeticPosition) -> DVec3 {
    let (sin_lat, cos_lat) = position.latitude_rad().sin_cos();
    let (sin_lon, cos_lon) = position.longitude_rad().sin_cos();
    let n = prime_vertical_radius(sin_lat);

    DVec3::new(
        (n + position.height) * cos_lat * cos_lon,
        (n + position.height) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_ECCENTRICITY_SQ) + position.height) * sin_lat,
    )
}

/// Convert an Earth-centred Cartesian point to a geodetic position.
///
/// Solves latitude by fixed-point iteration, which converges in a handful of
/// steps for anything near the surface. The Earth's centre has no defined
/// latitude and maps to `(0, 0, -a)`.
pub fn to_geodetic(point: DVec3) -> GeodeticPosition {
    let p = (point.x * point.x + point.y * point.y).sqrt();
    let longitude = point.y.atan2(point.x);

    if p < f64::EPSILON && point.z.abs() < f64::EPSILON {
        return GeodeticPosition::new(0.0, 0.0, -WGS84_SEMI_MAJOR_AXIS);
    }

    let mut latitude = point.z.atan2(p * (1.0 - WGS84_ECCENTRICITY_SQ));
    for _ in 0..MAX_LATITUDE_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = prime_vertical_radius(sin_lat);
        let next = (point.z + WGS84_ECCENTRICITY_SQ * n * sin_lat).atan2(p);
        let converged = (next - latitude).abs() < LATITUDE_TOLERANCE;
        latitude = next;
        if converged {
            break;
        }
    }

    let (sin_lat, cos_lat) = latitude.sin_cos();
    let n = prime_vertical_radius(sin_lat);
    // Near the poles p / cos(lat) is ill-conditioned; use the z form instead.
    let height = if cos_lat.abs() > 1e-3 {
        p / cos_lat - n
    } else {
        point.z / sin_lat - n * (1.0 - WGS84_ECCENTRICITY_SQ)
    };

    GeodeticPosition::new(latitude.to_degrees(), longitude.to_degrees(), height)
}

/// Outward geodetic surface normal at a Cartesian point.
///
/// This is the ellipsoid normal (gradient of x²/a² + y²/a² + z²/b²), which
/// differs from the radial direction by up to ~0.19° at mid latitudes.
pub fn surface_normal(point: DVec3) -> DVec3 {
    let a2 = WGS84_SEMI_MAJOR_AXIS * WGS84_SEMI_MAJOR_AXIS;
    let b2 = WGS84_SEMI_MINOR_AXIS * WGS84_SEMI_MINOR_AXIS;
    DVec3::new(point.x / a2, point.y / a2, point.z / b2).normalize_or(DVec3::Z)
}

/// Wrap a longitude in degrees into `[-180, 180)`.
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}
