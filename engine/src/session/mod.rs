//! Session Module
//!
//! Walk mode lifecycle and the per-frame pipeline, plus the traits the
//! embedding viewer implements.
//!
//! # Components
//!
//! - [`WalkMode`] - Enter/exit, event routing, per-frame publishing
//! - [`LocomotionSession`] - Input → orientation → locomotion → camera
//! - [`AircraftHost`], [`SceneHost`], [`CameraSink`] - Host collaborators
//! - [`MemoryHost`] - Recording host for headless runs

pub mod host;
pub mod locomotion_session;
pub mod memory_host;
pub mod walk_mode;

pub use host::{AircraftHost, CameraSink, PartHandle, SceneHost};
pub use locomotion_session::{FrameOutput, LocomotionSession};
pub use memory_host::{AircraftSpawn, LivePart, MemoryHost};
pub use walk_mode::{EventResponse, ModeChange, NO_AIRCRAFT_MESSAGE, WalkMode};
