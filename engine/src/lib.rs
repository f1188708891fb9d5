//! Ground Walk Engine
//!
//! Eject from an aircraft in a geospatial flight viewer and walk the globe
//! in first person. The library is the per-frame core: geodetic math, input
//! sampling, look smoothing, locomotion and camera pose resolution, plus the
//! walk mode lifecycle that drives them against host-provided collaborators.
//!
//! # Modules
//!
//! - [`geo`] - WGS84 geodetic conversions and the local east-north-up frame
//! - [`input`] - Platform-agnostic key/pointer input and the per-frame sampler
//! - [`camera`] - Look smoothing and first-person camera pose
//! - [`player`] - Locomotion integrator and the avatar rig
//! - [`session`] - Walk mode lifecycle and host traits
//! - [`config`] - JSON-backed tuning values
//! - [`time`] - Frame clock
//!
//! # Example
//!
//! ```ignore
//! use ground_walk_engine::{FrameClock, InputEvent, KeyCode, WalkConfig, WalkMode};
//!
//! let config = WalkConfig::load("walk.json")?;
//! let mut clock = FrameClock::new(&config.frame);
//! let mut walk = WalkMode::new(config);
//!
//! walk.enter(&mut viewer, &mut scene, &mut camera)?;
//! walk.handle_event(InputEvent::KeyDown(KeyCode::W));
//!
//! loop {
//!     walk.frame(clock.tick(), &mut scene, &mut camera);
//! }
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod geo;
pub mod input;
pub mod player;
pub mod session;
pub mod time;

pub use camera::{CameraPose, CameraPoseResolver, LookOrientation, OrientationSmoother};
pub use config::WalkConfig;
pub use error::{ConfigError, SceneError, WalkModeError};
pub use geo::{GeodeticPosition, LocalFrame};
pub use input::{InputEvent, InputSampler, InputSnapshot, KeyCode, MovementKeys};
pub use player::{AvatarRig, LocomotionIntegrator, LocomotionState};
pub use session::{
    AircraftHost, CameraSink, EventResponse, FrameOutput, LocomotionSession, MemoryHost,
    ModeChange, SceneHost, WalkMode,
};
pub use time::FrameClock;
