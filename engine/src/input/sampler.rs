//! Input Sampler
//!
//! Raw events are pushed in as they arrive from the host; the frame update
//! pulls exactly one [`InputSnapshot`] at frame start. Events only ever touch
//! the pending buffer, so a frame never sees intent change halfway through.

use std::collections::HashSet;

use super::{KeyBindings, KeyCode, MovementKeys, PointerState};

/// Raw input events, already translated out of the host's event types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Relative pointer motion in device units
    PointerMove { dx: f64, dy: f64 },
    /// Pointer lock acquired (`true`) or released (`false`)
    PointerLockChanged(bool),
    /// Primary button click on the view
    Click,
    /// View lost keyboard focus; key-up events may never arrive
    FocusLost,
}

/// Stabilized input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: MovementKeys,
    /// Pointer delta accumulated since the previous snapshot
    pub look_delta: (f64, f64),
    pub pointer_locked: bool,
}

/// Pending (event-side) half of the double buffer.
#[derive(Debug, Clone, Default)]
struct PendingInput {
    held: HashSet<KeyCode>,
    pointer: PointerState,
}

/// Double-buffered input: events write the pending buffer, `snapshot()`
/// publishes it to the frame.
#[derive(Debug, Clone)]
pub struct InputSampler {
    bindings: KeyBindings,
    pending: PendingInput,
    current: InputSnapshot,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputSampler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pending: PendingInput::default(),
            current: InputSnapshot::default(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Apply one raw event to the pending buffer.
    ///
    /// Returns `true` if the event changed movement or look state. Keys with
    /// no binding and pointer motion while unlocked return `false`.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(key) => {
                if self.bindings.get_action(key).is_none() {
                    return false;
                }
                self.pending.held.insert(key);
                true
            }
            InputEvent::KeyUp(key) => self.pending.held.remove(&key),
            InputEvent::PointerMove { dx, dy } => self.pending.pointer.accumulate_delta(dx, dy),
            InputEvent::PointerLockChanged(locked) => {
                self.pending.pointer.set_locked(locked);
                true
            }
            InputEvent::FocusLost => {
                let had_keys = !self.pending.held.is_empty();
                self.pending.held.clear();
                had_keys
            }
            InputEvent::Click => false,
        }
    }

    /// Publish the pending buffer as this frame's snapshot.
    ///
    /// Consumes the accumulated pointer delta; held keys carry over.
    pub fn snapshot(&mut self) -> InputSnapshot {
        self.current = InputSnapshot {
            movement: self.bindings.resolve(&self.pending.held),
            look_delta: self.pending.pointer.consume_delta(),
            pointer_locked: self.pending.pointer.is_locked(),
        };
        self.current
    }

    /// The most recently published snapshot.
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pending.pointer.is_locked()
    }

    /// Release every key and drop pending look input.
    pub fn reset(&mut self) {
        self.pending = PendingInput::default();
        self.current = InputSnapshot::default();
    }
}
