use crate::core::Rect;
use glam::Vec2;

/// Side of a tile the body was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    /// Body landed on the tile's top face
    Top,
    /// Body hit the tile's bottom face (head bump)
    Bottom,
    /// Body ran into the tile's left face
    Left,
    /// Body ran into the tile's right face
    Right,
}

impl CollisionSide {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Overlap depths between a body box and a tile box, one per tile face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Body bottom edge past the tile top edge
    pub top: f32,
    /// Tile bottom edge past the body top edge
    pub bottom: f32,
    /// Body right edge past the tile left edge
    pub left: f32,
    /// Tile right edge past the body left edge
    pub right: f32,
}

impl Penetration {
    pub fn between(body: &Rect, tile: &Rect) -> Self {
        Self {
            top: body.bottom() - tile.top(),
            bottom: tile.bottom() - body.top(),
            left: body.right() - tile.left(),
            right: tile.right() - body.left(),
        }
    }

    /// The face with the smallest overlap.
    ///
    /// Ties go to the face compared first, in the order top, bottom, left,
    /// right, so an exact corner hit resolves vertically.
    pub fn resolved_side(&self) -> CollisionSide {
        let mut side = CollisionSide::Top;
        let mut depth = self.top;

        for (candidate, candidate_depth) in [
            (CollisionSide::Bottom, self.bottom),
            (CollisionSide::Left, self.left),
            (CollisionSide::Right, self.right),
        ] {
            if candidate_depth < depth {
                side = candidate;
                depth = candidate_depth;
            }
        }

        side
    }
}

/// A resolved contact between a body and one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub side: CollisionSide,
    pub tile: Rect,
}

impl Contact {
    /// Offset that moves `body` flush against the contacted tile face
    pub fn correction(&self, body: &Rect) -> Vec2 {
        match self.side {
            CollisionSide::Top => Vec2::new(0.0, self.tile.top() - body.bottom()),
            CollisionSide::Bottom => Vec2::new(0.0, self.tile.bottom() - body.top()),
            CollisionSide::Left => Vec2::new(self.tile.left() - body.right(), 0.0),
            CollisionSide::Right => Vec2::new(self.tile.right() - body.left(), 0.0),
        }
    }
}

/// Find the contact between `body` and `tile`, if they truly overlap
pub fn contact(body: &Rect, tile: &Rect) -> Option<Contact> {
    if !body.intersects(tile) {
        return None;
    }
    Some(Contact {
        side: Penetration::between(body, tile).resolved_side(),
        tile: *tile,
    })
}
