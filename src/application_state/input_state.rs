//! # Input State
//!
//! The held-key snapshot the simulation reads once per tick. Key events from the
//! window system only ever touch the [`InputManager`](super::input_manager::InputManager);
//! the tick sees an immutable copy, so input never changes mid-update.

use std::collections::HashMap;

/// Keys the simulation responds to. Any other physical key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxKey {
    /// Move toward -Z
    Forward,
    /// Move toward +Z
    Back,
    /// Move toward -X
    Left,
    /// Move toward +X
    Right,
    /// Hold to levitate
    Jump,
}

impl SandboxKey {
    pub const ALL: [SandboxKey; 5] = [
        SandboxKey::Forward,
        SandboxKey::Back,
        SandboxKey::Left,
        SandboxKey::Right,
        SandboxKey::Jump,
    ];
}

/// Pressed/released state for each [`SandboxKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashMap<SandboxKey, bool>,
}

impl HeldKeys {
    /// A snapshot with every key released.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot with exactly `keys` held.
    pub fn holding(keys: &[SandboxKey]) -> Self {
        let mut held = Self::new();
        for key in keys {
            held.set(*key, true);
        }
        held
    }

    pub fn set(&mut self, key: SandboxKey, pressed: bool) {
        self.keys.insert(key, pressed);
    }

    /// Whether `key` is currently down. Keys never reported count as released.
    pub fn is_held(&self, key: SandboxKey) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    pub fn release_all(&mut self) {
        for pressed in self.keys.values_mut() {
            *pressed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreported_keys_are_released() {
        let keys = HeldKeys::new();
        assert!(SandboxKey::ALL.iter().all(|key| !keys.is_held(*key)));
    }

    #[test]
    fn release_all_clears_every_key() {
        let mut keys = HeldKeys::holding(&[SandboxKey::Jump, SandboxKey::Left]);
        assert!(keys.is_held(SandboxKey::Jump));
        assert!(keys.is_held(SandboxKey::Left));
        keys.release_all();
        assert!(!keys.is_held(SandboxKey::Jump));
        assert!(!keys.is_held(SandboxKey::Left));
    }
}
