//! Geo Module
//!
//! Geodetic math for walking on the globe: WGS84 conversions and the local
//! east-north-up frame.

pub mod ellipsoid;
pub mod local_frame;

pub use ellipsoid::{
    GeodeticPosition, WGS84_ECCENTRICITY_SQ, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS,
    WGS84_SEMI_MINOR_AXIS, surface_normal, to_cartesian, to_geodetic, wrap_longitude,
};
pub use local_frame::LocalFrame;
