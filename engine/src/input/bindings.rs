//! Input Bindings Module
//!
//! Maps physical keys to the logical movement actions. Several keys may
//! drive the same action (both Shift keys run), but a key drives at most one.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{KeyCode, MovementKeys};

/// Logical movement actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveAction {
    /// Walk forward (default: W)
    Forward,
    /// Walk backward (default: S)
    Backward,
    /// Strafe left (default: A)
    Left,
    /// Strafe right (default: D)
    Right,
    /// Run modifier (default: Shift)
    Run,
}

/// One key → action pair, as stored in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub action: MoveAction,
}

/// Maps physical keys to logical movement actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, MoveAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_pairs(&Self::default_pairs())
    }
}

impl KeyBindings {
    /// Create bindings with the default WASD + Shift layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings with no keys bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Default bindings:
    /// - W = Forward
    /// - S = Backward
    /// - A = Left
    /// - D = Right
    /// - Shift (either) = Run
    pub fn default_pairs() -> Vec<KeyBinding> {
        vec![
            KeyBinding {
                key: KeyCode::W,
                action: MoveAction::Forward,
            },
            KeyBinding {
                key: KeyCode::S,
                action: MoveAction::Backward,
            },
            KeyBinding {
                key: KeyCode::A,
                action: MoveAction::Left,
            },
            KeyBinding {
                key: KeyCode::D,
                action: MoveAction::Right,
            },
            KeyBinding {
                key: KeyCode::ShiftLeft,
                action: MoveAction::Run,
            },
            KeyBinding {
                key: KeyCode::ShiftRight,
                action: MoveAction::Run,
            },
        ]
    }

    /// Build bindings from a list of pairs. Later pairs win for the same key.
    pub fn from_pairs(pairs: &[KeyBinding]) -> Self {
        let mut bindings = Self::empty();
        for pair in pairs {
            bindings.bind(pair.key, pair.action);
        }
        bindings
    }

    /// Bind a physical key to a logical action, replacing any previous
    /// binding of that key. `Unknown` cannot be bound.
    pub fn bind(&mut self, key: KeyCode, action: MoveAction) {
        if key == KeyCode::Unknown {
            return;
        }
        self.key_to_action.insert(key, action);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<MoveAction> {
        self.key_to_action.get(&key).copied()
    }

    /// All keys bound to an action.
    pub fn keys_for(&self, action: MoveAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Check if an action is held, given the set of held keys.
    pub fn is_action_pressed(&self, action: MoveAction, held: &HashSet<KeyCode>) -> bool {
        held.iter().any(|key| self.get_action(*key) == Some(action))
    }

    /// Resolve the held keys into movement key state.
    pub fn resolve(&self, held: &HashSet<KeyCode>) -> MovementKeys {
        let mut keys = MovementKeys::new();
        for action in held.iter().filter_map(|key| self.get_action(*key)) {
            match action {
                MoveAction::Forward => keys.forward = true,
                MoveAction::Backward => keys.backward = true,
                MoveAction::Left => keys.left = true,
                MoveAction::Right => keys.right = true,
                MoveAction::Run => keys.run = true,
            }
        }
        keys
    }

    /// Get all current bindings as key-action pairs.
    pub fn all_bindings(&self) -> impl Iterator<Item = (KeyCode, MoveAction)> + '_ {
        self.key_to_action.iter().map(|(&k, &a)| (k, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(MoveAction::Forward));
        assert_eq!(bindings.get_action(KeyCode::S), Some(MoveAction::Backward));
        assert_eq!(bindings.get_action(KeyCode::A), Some(MoveAction::Left));
        assert_eq!(bindings.get_action(KeyCode::D), Some(MoveAction::Right));
        assert_eq!(bindings.get_action(KeyCode::ShiftLeft), Some(MoveAction::Run));
        assert_eq!(bindings.get_action(KeyCode::ShiftRight), Some(MoveAction::Run));
        assert_eq!(bindings.get_action(KeyCode::Escape), None);
    }

    #[test]
    fn test_both_shifts_run() {
        let bindings = KeyBindings::new();
        let mut run_keys = bindings.keys_for(MoveAction::Run);
        run_keys.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(run_keys, vec![KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyCode::ArrowUp, MoveAction::Forward);

        // W stays bound, ArrowUp is added
        assert_eq!(bindings.get_action(KeyCode::W), Some(MoveAction::Forward));
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(MoveAction::Forward));

        bindings.bind(KeyCode::W, MoveAction::Backward);
        assert_eq!(bindings.get_action(KeyCode::W), Some(MoveAction::Backward));
    }

    #[test]
    fn test_unknown_cannot_be_bound() {
        let mut bindings = KeyBindings::empty();
        bindings.bind(KeyCode::Unknown, MoveAction::Forward);
        assert_eq!(bindings.get_action(KeyCode::Unknown), None);
    }

    #[test]
    fn test_resolve_held_keys() {
        let bindings = KeyBindings::new();
        let held: HashSet<KeyCode> = [KeyCode::W, KeyCode::D, KeyCode::ShiftRight, KeyCode::Escape]
            .into_iter()
            .collect();

        let keys = bindings.resolve(&held);
        assert!(keys.forward);
        assert!(keys.right);
        assert!(keys.run);
        assert!(!keys.backward);
        assert!(!keys.left);
        assert!(bindings.is_action_pressed(MoveAction::Run, &held));
        assert!(!bindings.is_action_pressed(MoveAction::Left, &held));
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::W);

        let held: HashSet<KeyCode> = [KeyCode::W].into_iter().collect();
        assert!(!bindings.resolve(&held).forward);
    }
}
