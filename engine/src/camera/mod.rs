//! Camera Module
//!
//! Mouse-look smoothing and first-person pose resolution on the globe.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod orientation;
pub mod pose;

pub use orientation::{LookOrientation, OrientationSmoother};
pub use pose::{CameraPose, CameraPoseResolver, local_look_direction};
