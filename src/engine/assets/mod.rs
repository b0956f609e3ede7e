// Asset management system
//
// Locates asset files and extracts the frame metadata the simulation needs
// (frame sizes from sprite sheets). Pixel data stays with the renderer.

mod loader;
mod sheet;

pub use loader::{AssetLoader, AssetType};
pub use sheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Frame size {frame_width}x{frame_height} does not fit sheet {sheet_width}x{sheet_height}")]
    InvalidFrameSize {
        frame_width: u32,
        frame_height: u32,
        sheet_width: u32,
        sheet_height: u32,
    },

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
