// Character system
//
// This module contains everything related to the player actor:
// - Tuning constants
// - Animation frame layout and state machine
// - Attack overlay
// - Actor controller and the events it emits

pub mod animation;
pub mod character;
pub mod combat;
pub mod events;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationLayout, FrameBand, LayoutError, DEFAULT_FRAME_DURATION};
pub use character::{ActorConfig, ActorController, ActorInput};
pub use combat::{AttackConfig, CombatOverlay, CombatState, CombatUpdate};
pub use events::{ActorEvent, EventSink, LogSink};
pub use state::{AnimationState, AnimationStateMachine, Facing};
pub use stats::{ActorStats, BASE_STATS};
