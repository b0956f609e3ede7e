// Tile world: tile types, the tile grid and character map loading

mod grid;
mod loader;
mod tile_type;

pub use grid::{TileGrid, DEFAULT_TILE_SIZE};
pub use loader::{load_char_map, parse_char_map, LoadedMap, COMMENT_PREFIX, SPAWN_MARKER};
pub use tile_type::{TileAnimation, TileId, TileType, TileTypeRegistry, EMPTY_TILE};

/// Tile grid construction errors
#[derive(Debug, thiserror::Error)]
pub enum TileGridError {
    #[error("Invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Invalid tile size {width}x{height}: both must be positive")]
    InvalidTileSize { width: f32, height: f32 },
}

/// Map loading errors
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Map description contains no tiles")]
    Empty,

    #[error("Invalid map grid: {0}")]
    Grid(#[from] TileGridError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_display() {
        let err = TileGridError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid grid dimensions 0x5: both must be positive"
        );
    }

    #[test]
    fn test_map_error_from_grid_error() {
        let err: MapError = TileGridError::InvalidDimensions {
            width: -1,
            height: 1,
        }
        .into();
        assert!(matches!(err, MapError::Grid(_)));
    }
}
