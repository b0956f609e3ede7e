// Game-side modules built on top of the engine

pub mod characters;
