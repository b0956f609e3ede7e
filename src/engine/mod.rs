// Engine modules: tiles, physics, input, assets, frame clock

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod tiles;
