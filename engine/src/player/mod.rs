//! Player Module
//!
//! The walking avatar: kinematic locomotion over the globe and the visual
//! rig that follows it.
//!
//! # Components
//!
//! - [`LocomotionIntegrator`] - Key intent + yaw → target position, lerp chase
//! - [`LocomotionState`] - Current/target position pair
//! - [`AvatarRig`] - Handles of the figure's visual parts

pub mod avatar;
pub mod locomotion;

pub use avatar::{
    AvatarPart, AvatarRig, PartDescriptor, PartShape, WALK_CYCLE_AMPLITUDE, WALK_CYCLE_RATE,
    human_parts, leg_swing, part_position,
};
pub use locomotion::{LocomotionIntegrator, LocomotionState, LocomotionStep, intent_vector};
