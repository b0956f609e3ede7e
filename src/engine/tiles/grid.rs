// Fixed-size tile grid with solidity and collision queries

use super::tile_type::{TileId, TileType, TileTypeRegistry, EMPTY_TILE};
use super::TileGridError;
use crate::core::Rect;

/// Default tile size in sprite pixels
pub const DEFAULT_TILE_SIZE: f32 = 32.0;

/// A `width × height` grid of tile identifiers.
///
/// The shape is fixed at construction. Queries outside the grid resolve to
/// an empty, non-solid cell rather than failing.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tile_width: f32,
    tile_height: f32,
    /// Row-major cells, `cells[y * width + x]`
    cells: Vec<TileId>,
    registry: TileTypeRegistry,
}

impl TileGrid {
    /// Create an empty grid with the default 32×32 tile size
    pub fn new(width: i32, height: i32, registry: TileTypeRegistry) -> Result<Self, TileGridError> {
        Self::filled(width, height, EMPTY_TILE, registry)
    }

    /// Create a grid with every cell set to `tile`
    pub fn filled(
        width: i32,
        height: i32,
        tile: TileId,
        registry: TileTypeRegistry,
    ) -> Result<Self, TileGridError> {
        if width <= 0 || height <= 0 {
            return Err(TileGridError::InvalidDimensions { width, height });
        }

        let count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            cells: vec![tile; count],
            registry,
        })
    }

    /// Set the tile size in sprite pixels (before render scale)
    pub fn with_tile_size(mut self, tile_width: f32, tile_height: f32) -> Result<Self, TileGridError> {
        if !(tile_width > 0.0 && tile_height > 0.0) {
            return Err(TileGridError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        Ok(self)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_width(&self) -> f32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> f32 {
        self.tile_height
    }

    pub fn registry(&self) -> &TileTypeRegistry {
        &self.registry
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Identifier at `(x, y)`, or [`EMPTY_TILE`] outside the grid
    pub fn tile_at(&self, x: i32, y: i32) -> TileId {
        self.index(x, y)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(EMPTY_TILE)
    }

    /// Store a tile identifier. Writes outside the grid are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileId) {
        if let Some(cell) = self.index(x, y).and_then(|i| self.cells.get_mut(i)) {
            *cell = tile;
        }
    }

    /// Tile type at `(x, y)`, if the cell holds a registered identifier
    pub fn tile_type_at(&self, x: i32, y: i32) -> Option<&TileType> {
        self.registry.get(self.tile_at(x, y))
    }

    pub fn is_solid_at(&self, x: i32, y: i32) -> bool {
        self.registry.is_solid(self.tile_at(x, y))
    }

    /// Convert world pixel coordinates to tile coordinates.
    ///
    /// `scale` must match the render scale so conversions line up with drawn
    /// positions. Negative world coordinates map to negative tile indices.
    pub fn world_to_tile(&self, world_x: f32, world_y: f32, scale: f32) -> (i32, i32) {
        let tx = (world_x / (self.tile_width * scale)).floor() as i32;
        let ty = (world_y / (self.tile_height * scale)).floor() as i32;
        (tx, ty)
    }

    /// World rectangle covered by cell `(tx, ty)`
    pub fn tile_rect(&self, tx: i32, ty: i32, scale: f32) -> Rect {
        let w = self.tile_width * scale;
        let h = self.tile_height * scale;
        Rect::new(tx as f32 * w, ty as f32 * h, w, h)
    }

    /// Collision rectangles of all solid tiles touched by `area`.
    ///
    /// The scan covers every cell containing a corner of `area` (inclusive of
    /// the far edge, so the result is conservative) clamped to the grid, in
    /// row-major order.
    pub fn collision_rects_in_area(&self, area: &Rect, scale: f32) -> Vec<Rect> {
        let (min_x, min_y) = self.world_to_tile(area.left(), area.top(), scale);
        let (max_x, max_y) = self.world_to_tile(area.right(), area.bottom(), scale);

        let min_x = min_x.max(0);
        let min_y = min_y.max(0);
        let max_x = max_x.min(self.width - 1);
        let max_y = max_y.min(self.height - 1);

        let mut rects = Vec::new();
        for ty in min_y..=max_y {
            for tx in min_x..=max_x {
                if self.is_solid_at(tx, ty) {
                    rects.push(self.tile_rect(tx, ty, scale));
                }
            }
        }
        rects
    }

    /// Every solid cell as a world rectangle (collision mask overlay)
    pub fn solid_tiles(&self, scale: f32) -> impl Iterator<Item = Rect> + '_ {
        (0..self.height).flat_map(move |ty| {
            (0..self.width)
                .filter(move |&tx| self.is_solid_at(tx, ty))
                .map(move |tx| self.tile_rect(tx, ty, scale))
        })
    }
}
