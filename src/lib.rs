//! Moonlight: a 2D tile-based platformer runtime.
//!
//! The simulation core lives in [`engine::tiles`], [`engine::physics`] and
//! [`game::characters`]: per-frame input goes in, a resolved bounding box, an
//! animation frame and a stream of [`game::characters::ActorEvent`]s come out.
//! Rendering, audio and camera framing are left to the host.

pub mod core;
pub mod engine;
pub mod game;
