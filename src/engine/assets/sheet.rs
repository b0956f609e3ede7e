// Sprite sheet slicing
//
// Only frame geometry is read here; decoding pixels for drawing belongs to
// the renderer.

use super::AssetError;
use crate::core::Rect;
use glam::Vec2;
use image::GenericImageView;

/// A sprite sheet cut into equally sized frames, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    sheet_width: u32,
    sheet_height: u32,
    frame_width: u32,
    frame_height: u32,
    frames: Vec<Rect>,
}

impl SpriteSheet {
    /// Slice a `sheet_width × sheet_height` sheet into frames.
    ///
    /// Partial frames at the right and bottom edges are dropped.
    pub fn slice(
        sheet_width: u32,
        sheet_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, AssetError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(AssetError::InvalidFrameSize {
                frame_width,
                frame_height,
                sheet_width,
                sheet_height,
            });
        }

        let columns = sheet_width / frame_width;
        let rows = sheet_height / frame_height;
        if columns == 0 || rows == 0 {
            return Err(AssetError::InvalidFrameSize {
                frame_width,
                frame_height,
                sheet_width,
                sheet_height,
            });
        }

        let frames = (0..rows)
            .flat_map(|row| {
                (0..columns).map(move |col| {
                    Rect::new(
                        (col * frame_width) as f32,
                        (row * frame_height) as f32,
                        frame_width as f32,
                        frame_height as f32,
                    )
                })
            })
            .collect();

        Ok(Self {
            sheet_width,
            sheet_height,
            frame_width,
            frame_height,
            frames,
        })
    }

    /// Read the sheet dimensions from encoded image bytes and slice it
    pub fn from_image_bytes(
        bytes: &[u8],
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        Self::slice(width, height, frame_width, frame_height)
    }

    /// Source rectangle of frame `index` in sheet pixels
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index).copied()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Size of one frame in sheet pixels
    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame_width as f32, self.frame_height as f32)
    }

    pub fn sheet_size(&self) -> (u32, u32) {
        (self.sheet_width, self.sheet_height)
    }
}
