//! Pointer-Lock Mouse State
//!
//! Accumulates raw pointer deltas between frames for mouse-look. Deltas only
//! count while the pointer is locked; ordinary cursor movement over the page
//! or window must not spin the avatar.

/// Pointer state with lock gating and delta accumulation.
///
/// - **Lock gate**: `accumulate_delta` is a no-op while unlocked
/// - **Delta accumulation**: raw deltas add up until consumed
/// - **Atomic consumption**: `consume_delta()` returns the sum and resets it
///
/// # Example
///
/// ```rust,ignore
/// let mut pointer = PointerState::new();
/// pointer.set_locked(true);
///
/// // In event loop
/// pointer.accumulate_delta(10.0, -5.0);
/// pointer.accumulate_delta(3.0, 2.0);
///
/// // Once per frame
/// let (dx, dy) = pointer.consume_delta(); // (13.0, -3.0)
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Accumulated horizontal delta since last consume.
    delta_x: f64,
    /// Accumulated vertical delta since last consume.
    delta_y: f64,
    /// Whether the pointer is currently locked to the view.
    locked: bool,
}

impl PointerState {
    /// Create a new pointer state with zero deltas and the pointer unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw pointer motion. Ignored unless the pointer is locked.
    ///
    /// Returns `true` if the delta was accepted.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f64, dy: f64) -> bool {
        if !self.locked || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.delta_x += dx;
        self.delta_y += dy;
        true
    }

    /// Consume the accumulated delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f64, f64) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Record a pointer-lock change reported by the host.
    ///
    /// Losing the lock drops any pending delta so the view does not jump.
    #[inline]
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if !locked {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    /// Check if the pointer is currently locked.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f64, f64) {
        (self.delta_x, self.delta_y)
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
