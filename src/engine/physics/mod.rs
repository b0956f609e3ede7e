// Tile-based kinematic physics
//
// Bodies integrate gravity and input velocity once per step and are pushed
// out of solid tiles with axis-separated passes (horizontal, then vertical).
// Resolution is discrete: a body moving more than a tile per step can pass
// through thin walls.

pub mod body;
mod collision;

pub use body::{Axis, BodyShape, MotionBody, MotionParams, StepOutcome};
pub use collision::{contact, CollisionSide, Contact, Penetration};
