// Input manager - translates window key events into player actions

use super::action::{default_bindings, Action, InputSource};
use super::player::PlayerInput;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Maps keyboard events onto the local player's action state
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Input state for the player
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default key bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    /// Create an input manager from a list of bindings
    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            player: PlayerInput::new(),
        }
    }

    /// Bind an input source to an action, replacing any previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Action bound to an input source
    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    fn handle(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.action_for(source) else {
            return;
        };

        match state {
            // Key repeats are not new presses
            ElementState::Pressed if !repeat => self.player.press(action),
            ElementState::Pressed => {}
            ElementState::Released => self.player.release(action),
        }
    }

    /// Clear per-frame edges. Call once per frame after the simulation step.
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Reset the player input state
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
