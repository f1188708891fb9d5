//! Input Module
//!
//! Platform-agnostic input handling for the walking avatar. Raw events are
//! pushed into an [`InputSampler`]; the frame update pulls one snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use ground_walk_engine::input::{InputEvent, InputSampler, KeyCode};
//!
//! let mut sampler = InputSampler::default();
//!
//! // From the host event loop
//! sampler.handle_event(InputEvent::PointerLockChanged(true));
//! sampler.handle_event(InputEvent::KeyDown(KeyCode::W));
//! sampler.handle_event(InputEvent::PointerMove { dx: 12.0, dy: -3.0 });
//!
//! // Once per frame
//! let snapshot = sampler.snapshot();
//! if snapshot.movement.forward {
//!     // Walk forward
//! }
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse_state;
pub mod sampler;
pub mod winit_bridge;

pub use bindings::{KeyBinding, KeyBindings, MoveAction};
pub use keyboard::{KeyCode, MovementKeys};
pub use mouse_state::PointerState;
pub use sampler::{InputEvent, InputSampler, InputSnapshot};
