// Tile type metadata and registry

use std::collections::HashMap;

/// Identifier stored in each grid cell
pub type TileId = i32;

/// Identifier of an empty cell
pub const EMPTY_TILE: TileId = -1;

/// Default seconds per frame for animated tiles
const DEFAULT_TILE_FRAME_DURATION: f32 = 0.1;

/// Frame sequence for an animated tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileAnimation {
    /// Indices into the tile sprite sheet
    pub frames: Vec<usize>,
    /// Seconds each frame stays on screen
    pub frame_duration: f32,
}

/// Visual and physical properties shared by every cell of one type
#[derive(Debug, Clone, PartialEq)]
pub struct TileType {
    pub id: TileId,
    pub name: String,
    /// Static frame index into the tile sprite sheet
    pub frame_index: usize,
    pub solid: bool,
    pub blocks_light: bool,
    pub animation: Option<TileAnimation>,
}

impl TileType {
    /// Create a non-solid, non-animated tile type
    pub fn new(id: TileId, name: &str, frame_index: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            frame_index,
            solid: false,
            blocks_light: false,
            animation: None,
        }
    }

    /// Mark the tile as solid (collides with actors)
    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    /// Mark the tile as blocking light
    pub fn blocks_light(mut self) -> Self {
        self.blocks_light = true;
        self
    }

    /// Animate the tile through `frames` at the default cadence
    pub fn with_animation(self, frames: Vec<usize>) -> Self {
        self.with_animation_speed(frames, DEFAULT_TILE_FRAME_DURATION)
    }

    /// Animate the tile through `frames`, `frame_duration` seconds each
    pub fn with_animation_speed(mut self, frames: Vec<usize>, frame_duration: f32) -> Self {
        self.animation = Some(TileAnimation {
            frames,
            frame_duration,
        });
        self
    }

    pub fn is_animated(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|anim| !anim.frames.is_empty() && anim.frame_duration > 0.0)
    }

    /// Sprite frame to draw at absolute time `time` (seconds)
    pub fn frame_at(&self, time: f32) -> usize {
        match &self.animation {
            Some(anim) if self.is_animated() => {
                let step = (time.max(0.0) / anim.frame_duration) as usize;
                anim.frames[step % anim.frames.len()]
            }
            _ => self.frame_index,
        }
    }
}

/// Lookup table from tile identifier to tile type
#[derive(Debug, Clone, Default)]
pub struct TileTypeRegistry {
    types: HashMap<TileId, TileType>,
}

impl TileTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tile type, replacing any previous type with the same id
    pub fn register(&mut self, tile_type: TileType) {
        self.types.insert(tile_type.id, tile_type);
    }

    /// Builder-style registration
    pub fn with(mut self, tile_type: TileType) -> Self {
        self.register(tile_type);
        self
    }

    /// Get a tile type. Negative or unregistered identifiers have no type.
    pub fn get(&self, id: TileId) -> Option<&TileType> {
        if id < 0 {
            return None;
        }
        self.types.get(&id)
    }

    pub fn is_solid(&self, id: TileId) -> bool {
        self.get(id).is_some_and(|t| t.solid)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
