// Character map loading
//
// A map is a text grid where each character selects a tile type. Lines
// starting with the comment prefix are skipped and a `P` marks the player
// spawn point.

use super::grid::TileGrid;
use super::tile_type::{TileId, TileTypeRegistry, EMPTY_TILE};
use super::MapError;
use glam::Vec2;
use std::collections::HashMap;
use std::path::Path;

/// Lines starting with this character are ignored
pub const COMMENT_PREFIX: char = ';';

/// Character marking the player spawn cell
pub const SPAWN_MARKER: char = 'P';

/// Result of parsing a character map
#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub grid: TileGrid,
    /// Spawn cell in tile coordinates, if the map contains a `P`
    pub spawn: Option<(i32, i32)>,
}

impl LoadedMap {
    /// Spawn point as the top-left world pixel of its cell
    pub fn spawn_world_position(&self, scale: f32) -> Option<Vec2> {
        self.spawn
            .map(|(x, y)| self.grid.tile_rect(x, y, scale).min())
    }
}

/// Parse a character map.
///
/// The grid width is the longest row; short rows are padded with empty
/// tiles. Unknown characters become empty cells. If several `P` markers are
/// present the last one (in reading order) wins.
pub fn parse_char_map(
    text: &str,
    char_to_tile: &HashMap<char, TileId>,
    registry: TileTypeRegistry,
) -> Result<LoadedMap, MapError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .collect();

    let height = lines.len();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(MapError::Empty);
    }

    let mut grid = TileGrid::new(width as i32, height as i32, registry)?;
    let mut spawn = None;

    for (y, row) in lines.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let (x, y) = (x as i32, y as i32);
            if c == SPAWN_MARKER {
                spawn = Some((x, y));
                grid.set_tile(x, y, EMPTY_TILE);
            } else {
                let tile = char_to_tile.get(&c).copied().unwrap_or(EMPTY_TILE);
                grid.set_tile(x, y, tile);
            }
        }
    }

    log::info!(
        "Loaded {}x{} map ({} solid tiles, spawn: {:?})",
        width,
        height,
        grid.solid_tiles(1.0).count(),
        spawn
    );

    Ok(LoadedMap { grid, spawn })
}

/// Read and parse a character map file
pub fn load_char_map<P: AsRef<Path>>(
    path: P,
    char_to_tile: &HashMap<char, TileId>,
    registry: TileTypeRegistry,
) -> Result<LoadedMap, MapError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_char_map(&text, char_to_tile, registry)
}
