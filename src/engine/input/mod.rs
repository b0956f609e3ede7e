// Input handling system
//
// ## Architecture
//
// - `action`: Defines game actions, horizontal intent and default key bindings
// - `player`: Held / just-pressed action state
// - `manager`: Translates winit keyboard events through the binding table
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input_manager = InputManager::new();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Step the simulation with the current state...
// if input_manager.player().just_pressed(Action::Jump) {
//     // Jump edge this frame
// }
//
// // ...then clear the per-frame edges
// input_manager.update();
// ```

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, HorizontalIntent, InputSource};
pub use manager::InputManager;
pub use player::PlayerInput;
