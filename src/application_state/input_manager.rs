//! # Input Manager
//!
//! Translates window keyboard events into the held-key map the simulation reads.
//! Events arrive between ticks; [`InputManager::snapshot`] hands the tick a copy.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{HeldKeys, SandboxKey};

const KEY_BINDINGS: [(KeyCode, SandboxKey); 9] = [
    (KeyCode::KeyW, SandboxKey::Forward),
    (KeyCode::ArrowUp, SandboxKey::Forward),
    (KeyCode::KeyS, SandboxKey::Back),
    (KeyCode::ArrowDown, SandboxKey::Back),
    (KeyCode::KeyA, SandboxKey::Left),
    (KeyCode::ArrowLeft, SandboxKey::Left),
    (KeyCode::KeyD, SandboxKey::Right),
    (KeyCode::ArrowRight, SandboxKey::Right),
    (KeyCode::Space, SandboxKey::Jump),
];

/// Tracks which physical keys are down and which sandbox key each one drives.
pub struct InputManager {
    /// Current state of every bound physical key
    keyboard_inputs: HashMap<KeyCode, bool>,
    bindings: HashMap<KeyCode, SandboxKey>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a manager with every bound key released.
    pub fn new() -> Self {
        let mut keyboard_inputs = HashMap::new();
        let mut bindings = HashMap::new();
        for (key_code, key) in KEY_BINDINGS {
            keyboard_inputs.insert(key_code, false);
            bindings.insert(key_code, key);
        }

        Self {
            keyboard_inputs,
            bindings,
        }
    }

    /// Processes a window event and updates internal key state.
    ///
    /// Unbound keys and non-keyboard events are ignored.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state,
                    physical_key: PhysicalKey::Code(key),
                    ..
                },
            ..
        } = event
        {
            self.set_key(*key, *state == ElementState::Pressed);
        }
    }

    /// Records a key transition. Unbound keys are a no-op.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Builds the held-key snapshot for the next tick.
    ///
    /// A sandbox key counts as held when any physical key bound to it is down.
    pub fn snapshot(&self) -> HeldKeys {
        let mut held = HeldKeys::new();
        for (key_code, pressed) in &self.keyboard_inputs {
            if *pressed {
                if let Some(key) = self.bindings.get(key_code) {
                    held.set(*key, true);
                }
            }
        }
        held
    }

    /// Releases every key.
    ///
    /// Called when the window loses focus so no key stays stuck down.
    pub fn reset_inputs(&mut self) {
        for key_state in self.keyboard_inputs.values_mut() {
            *key_state = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_map_to_sandbox_keys() {
        let mut input = InputManager::new();
        input.set_key(KeyCode::KeyW, true);
        input.set_key(KeyCode::Space, true);
        let held = input.snapshot();
        assert!(held.is_held(SandboxKey::Forward));
        assert!(held.is_held(SandboxKey::Jump));
        assert!(!held.is_held(SandboxKey::Back));
    }

    #[test]
    fn either_binding_holds_the_key() {
        let mut input = InputManager::new();
        input.set_key(KeyCode::ArrowLeft, true);
        assert!(input.snapshot().is_held(SandboxKey::Left));
        input.set_key(KeyCode::KeyA, true);
        input.set_key(KeyCode::ArrowLeft, false);
        assert!(input.snapshot().is_held(SandboxKey::Left));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputManager::new();
        input.set_key(KeyCode::KeyQ, true);
        assert_eq!(input.snapshot(), HeldKeys::new());
    }

    #[test]
    fn reset_releases_everything() {
        let mut input = InputManager::new();
        input.set_key(KeyCode::KeyD, true);
        input.reset_inputs();
        assert!(!input.snapshot().is_held(SandboxKey::Right));
    }
}
