//! Keyboard Input Module
//!
//! Generic key codes and the per-frame movement key state.
//! Decoupled from winit; see `winit_bridge` for the translation.

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
///
/// Only keys that can meaningfully drive the walking avatar are named;
/// everything else arrives as `Unknown` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    ShiftLeft,
    ShiftRight,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Parse a key identifier as delivered by browser-style hosts
    /// (`"w"`, `"W"`, `"Shift"`, `"ArrowUp"`, ...). Case-insensitive.
    ///
    /// A bare `"SHIFT"` carries no side and maps to `ShiftLeft`.
    pub fn from_key_name(name: &str) -> KeyCode {
        match name.trim().to_ascii_uppercase().as_str() {
            "W" | "KEYW" => KeyCode::W,
            "A" | "KEYA" => KeyCode::A,
            "S" | "KEYS" => KeyCode::S,
            "D" | "KEYD" => KeyCode::D,
            "SHIFT" | "SHIFTLEFT" => KeyCode::ShiftLeft,
            "SHIFTRIGHT" => KeyCode::ShiftRight,
            "ARROWUP" => KeyCode::ArrowUp,
            "ARROWDOWN" => KeyCode::ArrowDown,
            "ARROWLEFT" => KeyCode::ArrowLeft,
            "ARROWRIGHT" => KeyCode::ArrowRight,
            "ESCAPE" | "ESC" => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}

/// Held state of the logical movement actions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Run modifier (Shift by default)
    pub run: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any directional key is held. Run alone does not move.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Check if the run modifier is held.
    pub fn is_running(&self) -> bool {
        self.run
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}
