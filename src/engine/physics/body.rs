use super::collision::{self, CollisionSide, Contact};
use crate::core::Rect;
use crate::engine::input::HorizontalIntent;
use crate::engine::tiles::TileGrid;
use glam::Vec2;

/// Movement tuning, in pixels per simulation step.
///
/// Values are tuned for a ~60 Hz host loop; they are applied once per step
/// regardless of the frame's elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Added to the vertical velocity every step (positive is down)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_speed: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            gravity: 0.5,
            jump_speed: -10.0,
        }
    }
}

/// How the body's bounding box is derived from its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Active animation frame size in sprite pixels, multiplied by the scale
    Frame { frame_size: Vec2 },
    /// Fixed world-space box offset from the position
    Explicit { offset: Vec2, size: Vec2 },
}

/// Which axis a resolution pass follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// What happened to the body during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// A jump was accepted this step
    pub jumped: bool,
    /// Ground contact went from false to true this step
    pub landed: bool,
    /// Every contact resolved this step, in resolution order
    pub contacts: Vec<Contact>,
}

/// Position/velocity state of one actor, moved against a tile grid
#[derive(Debug, Clone)]
pub struct MotionBody {
    /// Top-left of the body in world pixels
    position: Vec2,
    velocity: Vec2,
    grounded: bool,
    shape: BodyShape,
    /// Render scale applied to frame and tile sizes
    scale: f32,
    params: MotionParams,
}

impl MotionBody {
    pub fn new(position: Vec2, shape: BodyShape, scale: f32, params: MotionParams) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            grounded: false,
            shape,
            scale,
            params,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn shape(&self) -> BodyShape {
        self.shape
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Teleport the body, clearing its velocity and ground contact
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Replace the bounding box rule (e.g. when the active frame size changes)
    pub fn set_shape(&mut self, shape: BodyShape) {
        self.shape = shape;
    }

    /// Current world-space bounding box
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box_at(self.position)
    }

    fn bounding_box_at(&self, position: Vec2) -> Rect {
        match self.shape {
            BodyShape::Frame { frame_size } => {
                Rect::from_min_size(position, frame_size * self.scale)
            }
            BodyShape::Explicit { offset, size } => {
                Rect::from_min_size(position + offset, size)
            }
        }
    }

    /// Advance one simulation step.
    ///
    /// Gravity is applied first, then the jump (only while grounded), then
    /// the horizontal move and its resolution, then the vertical move and its
    /// resolution. Ground contact is re-derived from this step's contacts.
    pub fn step(
        &mut self,
        grid: &TileGrid,
        intent: HorizontalIntent,
        jump_requested: bool,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        let was_grounded = self.grounded;

        // No terminal velocity clamp
        self.velocity.y += self.params.gravity;

        if jump_requested && self.grounded {
            self.velocity.y = self.params.jump_speed;
            outcome.jumped = true;
        }

        // Contact must be re-established by resolving against a floor
        self.grounded = false;

        self.velocity.x = intent.sign() * self.params.move_speed;
        self.position.x += self.velocity.x;
        self.resolve_collisions(grid, Axis::Horizontal, &mut outcome.contacts);

        self.position.y += self.velocity.y;
        self.resolve_collisions(grid, Axis::Vertical, &mut outcome.contacts);

        outcome.landed = self.grounded && !was_grounded;
        outcome
    }

    /// Push the body out of every solid tile it overlaps.
    ///
    /// Candidates are resolved one after another, each against the position
    /// corrected by the previous ones. Each contact is resolved along its
    /// minimum-depth side whichever pass found it; `pass` only labels the
    /// trace log. Returns the number of contacts.
    pub fn resolve_collisions(
        &mut self,
        grid: &TileGrid,
        pass: Axis,
        contacts: &mut Vec<Contact>,
    ) -> usize {
        let candidates = grid.collision_rects_in_area(&self.bounding_box(), self.scale);
        let mut resolved = 0;

        for tile in candidates {
            let body = self.bounding_box();
            let Some(contact) = collision::contact(&body, &tile) else {
                continue;
            };

            self.position = self.flush_position(&contact, &body);
            match contact.side {
                CollisionSide::Top => {
                    self.velocity.y = 0.0;
                    self.grounded = true;
                }
                CollisionSide::Bottom => self.velocity.y = 0.0,
                CollisionSide::Left | CollisionSide::Right => self.velocity.x = 0.0,
            }

            log::trace!(
                "{:?} pass: resolved {:?} contact with tile at ({}, {})",
                pass,
                contact.side,
                tile.x,
                tile.y
            );
            contacts.push(contact);
            resolved += 1;
        }

        resolved
    }

    /// Position that puts the contacted face of the box exactly on the tile
    /// face, or as close as `f32` allows without overlapping it
    fn flush_position(&self, contact: &Contact, body: &Rect) -> Vec2 {
        let mut position = self.position + contact.correction(body);
        let tile = contact.tile;

        match contact.side {
            CollisionSide::Top => {
                position.y = snap_coordinate(position.y, tile.top(), Limit::AtMost, |y| {
                    self.bounding_box_at(Vec2::new(position.x, y)).bottom()
                });
            }
            CollisionSide::Bottom => {
                position.y = snap_coordinate(position.y, tile.bottom(), Limit::AtLeast, |y| {
                    self.bounding_box_at(Vec2::new(position.x, y)).top()
                });
            }
            CollisionSide::Left => {
                position.x = snap_coordinate(position.x, tile.left(), Limit::AtMost, |x| {
                    self.bounding_box_at(Vec2::new(x, position.y)).right()
                });
            }
            CollisionSide::Right => {
                position.x = snap_coordinate(position.x, tile.right(), Limit::AtLeast, |x| {
                    self.bounding_box_at(Vec2::new(x, position.y)).left()
                });
            }
        }

        position
    }
}

/// Most steps a snapped coordinate may move from its estimate
const MAX_SNAP_STEPS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    /// The edge must not pass `target` going up the axis
    AtMost,
    /// The edge must not pass `target` going down the axis
    AtLeast,
}

/// Nudge `estimate` until `edge(coordinate)` no longer crosses `target`,
/// then back toward `target` while it still does not cross.
///
/// Steps are one ulp of the larger of the coordinate and the target, so every
/// step moves the edge. `edge` must be non-decreasing in its argument.
fn snap_coordinate(estimate: f32, target: f32, limit: Limit, edge: impl Fn(f32) -> f32) -> f32 {
    let allowed = |c: f32| match limit {
        Limit::AtMost => edge(c) <= target,
        Limit::AtLeast => edge(c) >= target,
    };
    let step = ulp(estimate.abs().max(target.abs()));
    let (away, toward) = match limit {
        Limit::AtMost => (-step, step),
        Limit::AtLeast => (step, -step),
    };

    let mut coordinate = estimate;
    for _ in 0..MAX_SNAP_STEPS {
        if allowed(coordinate) {
            break;
        }
        coordinate += away;
    }
    for _ in 0..MAX_SNAP_STEPS {
        if edge(coordinate) == target {
            break;
        }
        let candidate = coordinate + toward;
        if !allowed(candidate) {
            break;
        }
        coordinate = candidate;
    }
    coordinate
}

/// Gap between `x` (non-negative) and the next larger `f32`
fn ulp(x: f32) -> f32 {
    next_up(x) - x
}

fn next_up(x: f32) -> f32 {
    if !x.is_finite() {
        return x;
    }
    if x == 0.0 {
        return f32::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f32::from_bits(bits + 1)
    } else {
        f32::from_bits(bits - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tiles::{TileType, TileTypeRegistry};
    use approx::assert_relative_eq;

    const STONE: i32 = 0;

    fn grid(width: i32, height: i32, tile_size: f32, solids: &[(i32, i32)]) -> TileGrid {
        let registry = TileTypeRegistry::new().with(TileType::new(STONE, "stone", 0).solid());
        let mut grid = TileGrid::new(width, height, registry)
            .unwrap()
            .with_tile_size(tile_size, tile_size)
            .unwrap();
        for &(x, y) in solids {
            grid.set_tile(x, y, STONE);
        }
        grid
    }

    fn params(gravity: f32) -> MotionParams {
        MotionParams {
            move_speed: 2.0,
            gravity,
            jump_speed: -6.0,
        }
    }

    fn unit_body(x: f32, y: f32, gravity: f32) -> MotionBody {
        MotionBody::new(
            Vec2::new(x, y),
            BodyShape::Frame {
                frame_size: Vec2::ONE,
            },
            1.0,
            params(gravity),
        )
    }

    #[test]
    fn test_bounding_box_from_frame() {
        let body = MotionBody::new(
            Vec2::new(10.0, 20.0),
            BodyShape::Frame {
                frame_size: Vec2::new(32.0, 16.0),
            },
            4.0,
            MotionParams::default(),
        );
        assert_eq!(body.bounding_box(), Rect::new(10.0, 20.0, 128.0, 64.0));
    }

    #[test]
    fn test_bounding_box_explicit_override() {
        let body = MotionBody::new(
            Vec2::new(10.0, 20.0),
            BodyShape::Explicit {
                offset: Vec2::new(8.0, 4.0),
                size: Vec2::new(16.0, 28.0),
            },
            4.0,
            MotionParams::default(),
        );
        assert_eq!(body.bounding_box(), Rect::new(18.0, 24.0, 16.0, 28.0));
    }

    #[test]
    fn test_gravity_accumulates_without_clamp() {
        let grid = grid(3, 3, 1.0, &[]);
        let mut body = unit_body(-100.0, -100.0, 3.0);

        for _ in 0..50 {
            body.step(&grid, HorizontalIntent::None, false);
        }
        assert_relative_eq!(body.velocity().y, 150.0);
    }

    #[test]
    fn test_falls_onto_tile_and_lands() {
        // 3x3 grid, tile (1, 2) solid, unit body falling from the top.
        // Starts at y = 0.5 with vy = 1: from y = 0 with vy = 5 the body would
        // tunnel through the tile, since resolution is discrete.
        let grid = grid(3, 3, 1.0, &[(1, 2)]);
        let mut body = unit_body(1.0, 0.5, 0.0);
        body.set_velocity(Vec2::new(0.0, 1.0));

        let outcome = body.step(&grid, HorizontalIntent::None, false);

        assert_eq!(body.bounding_box().bottom(), 2.0);
        assert_eq!(body.velocity().y, 0.0);
        assert!(body.is_grounded());
        assert!(outcome.landed);
        assert_eq!(outcome.contacts.len(), 1);
        assert_eq!(outcome.contacts[0].side, CollisionSide::Top);
    }

    #[test]
    fn test_fast_fall_lands_flush_on_tile_top() {
        let grid = grid(3, 3, 32.0, &[(1, 2)]);
        let mut body = MotionBody::new(
            Vec2::new(32.0, 0.0),
            BodyShape::Frame {
                frame_size: Vec2::splat(32.0),
            },
            1.0,
            params(0.5),
        );
        body.set_velocity(Vec2::new(0.0, 5.0));

        let mut landings = 0;
        for _ in 0..20 {
            if body.step(&grid, HorizontalIntent::None, false).landed {
                landings += 1;
            }
        }

        assert_eq!(body.bounding_box().bottom(), 64.0);
        assert_eq!(body.velocity().y, 0.0);
        assert!(body.is_grounded());
        assert_eq!(landings, 1);
    }

    #[test]
    fn test_landed_fires_once_while_resting() {
        let grid = grid(5, 3, 32.0, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
        let mut body = MotionBody::new(
            Vec2::new(40.0, 20.0),
            BodyShape::Frame {
                frame_size: Vec2::splat(32.0),
            },
            1.0,
            params(0.5),
        );

        let landed: Vec<bool> = (0..60)
            .map(|_| body.step(&grid, HorizontalIntent::None, false).landed)
            .collect();

        assert_eq!(landed.iter().filter(|&&l| l).count(), 1);
        assert!(body.is_grounded());
        assert_eq!(body.bounding_box().bottom(), 64.0);
    }

    #[test]
    fn test_walks_into_wall() {
        // Floor along row 2, single wall column at x = 3
        let grid = grid(5, 3, 32.0, &[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2), (3, 1)]);
        let mut body = MotionBody::new(
            Vec2::new(40.0, 32.0),
            BodyShape::Frame {
                frame_size: Vec2::new(16.0, 32.0),
            },
            1.0,
            params(0.5),
        );

        for _ in 0..40 {
            body.step(&grid, HorizontalIntent::Right, false);
        }

        assert_eq!(body.bounding_box().right(), 96.0);
        assert_eq!(body.velocity().x, 0.0);
        assert!(body.is_grounded());
    }

    #[test]
    fn test_horizontal_velocity_is_not_accumulated() {
        let grid = grid(3, 3, 32.0, &[]);
        let mut body = unit_body(0.0, 0.0, 0.0);

        body.step(&grid, HorizontalIntent::Left, false);
        body.step(&grid, HorizontalIntent::Left, false);
        assert_eq!(body.velocity().x, -2.0);
        assert_eq!(body.position().x, -4.0);

        body.step(&grid, HorizontalIntent::None, false);
        assert_eq!(body.velocity().x, 0.0);
        assert_eq!(body.position().x, -4.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let grid = grid(3, 3, 1.0, &[]);
        let mut body = unit_body(0.0, -50.0, 0.5);
        body.set_velocity(Vec2::new(0.0, 1.0));

        let outcome = body.step(&grid, HorizontalIntent::None, true);

        assert!(!outcome.jumped);
        assert_relative_eq!(body.velocity().y, 1.5);
    }

    #[test]
    fn test_jump_from_ground() {
        let grid = grid(3, 3, 32.0, &[(0, 2), (1, 2), (2, 2)]);
        let mut body = MotionBody::new(
            Vec2::new(32.0, 32.0),
            BodyShape::Frame {
                frame_size: Vec2::splat(32.0),
            },
            1.0,
            params(0.5),
        );
        body.step(&grid, HorizontalIntent::None, false);
        assert!(body.is_grounded());

        let outcome = body.step(&grid, HorizontalIntent::None, true);

        assert!(outcome.jumped);
        assert!(!outcome.landed);
        assert!(!body.is_grounded());
        assert_eq!(body.velocity().y, -6.0);
        assert_eq!(body.position().y, 26.0);
    }

    #[test]
    fn test_head_bump_stops_upward_motion() {
        let grid = grid(3, 4, 32.0, &[(1, 0)]);
        let mut body = MotionBody::new(
            Vec2::new(32.0, 40.0),
            BodyShape::Frame {
                frame_size: Vec2::splat(32.0),
            },
            1.0,
            params(0.0),
        );
        body.set_velocity(Vec2::new(0.0, -12.0));

        let outcome = body.step(&grid, HorizontalIntent::None, false);

        assert_eq!(body.position().y, 32.0);
        assert_eq!(body.velocity().y, 0.0);
        assert!(!body.is_grounded());
        assert_eq!(outcome.contacts[0].side, CollisionSide::Bottom);
    }

    #[test]
    fn test_walking_off_ledge_clears_ground_contact() {
        let grid = grid(4, 3, 32.0, &[(0, 2)]);
        let mut body = MotionBody::new(
            Vec2::new(0.0, 32.0),
            BodyShape::Frame {
                frame_size: Vec2::splat(32.0),
            },
            1.0,
            MotionParams {
                move_speed: 8.0,
                gravity: 0.5,
                jump_speed: -6.0,
            },
        );
        body.step(&grid, HorizontalIntent::None, false);
        assert!(body.is_grounded());

        for _ in 0..5 {
            body.step(&grid, HorizontalIntent::Right, false);
        }
        assert!(!body.is_grounded());
        assert!(body.velocity().y > 0.0);
    }

    #[test]
    fn test_resolution_leaves_no_overlap() {
        let grid = grid(6, 6, 16.0, &[(2, 3), (3, 3), (4, 3), (4, 2)]);
        let mut body = MotionBody::new(
            Vec2::new(36.0, 10.0),
            BodyShape::Frame {
                frame_size: Vec2::new(12.0, 20.0),
            },
            1.0,
            MotionParams {
                move_speed: 3.0,
                gravity: 0.7,
                jump_speed: -6.0,
            },
        );

        for _ in 0..60 {
            body.step(&grid, HorizontalIntent::Right, false);
            let bbox = body.bounding_box();
            for tile in grid.collision_rects_in_area(&bbox, 1.0) {
                assert!(!bbox.intersects(&tile), "{:?} overlaps {:?}", bbox, tile);
            }
        }
    }

    #[test]
    fn test_landing_with_non_dyadic_box_never_overlaps_floor() {
        let floor: Vec<(i32, i32)> = (0..4).map(|x| (x, 10)).collect();
        let grid = grid(4, 12, 32.0, &floor);

        for i in 0..200 {
            let offset = 0.1 + i as f32 * 0.037;
            let mut body = MotionBody::new(
                Vec2::new(40.0, 260.0),
                BodyShape::Explicit {
                    offset: Vec2::new(0.0, offset),
                    size: Vec2::new(16.0, 13.7 + offset),
                },
                1.0,
                params(0.5),
            );
            for _ in 0..40 {
                body.step(&grid, HorizontalIntent::None, false);
            }

            let bottom = body.bounding_box().bottom();
            assert!(body.is_grounded(), "offset {}", offset);
            assert!(bottom <= 320.0, "offset {} leaves bottom at {}", offset, bottom);
            assert!(320.0 - bottom < 1e-3, "offset {} stops short at {}", offset, bottom);
        }
    }

    #[test]
    fn test_wall_contact_with_non_dyadic_box_never_overlaps() {
        let grid = grid(6, 3, 32.0, &[(4, 0), (4, 1), (4, 2)]);

        for i in 0..200 {
            let offset = 0.3 + i as f32 * 0.029;
            let mut body = MotionBody::new(
                Vec2::new(20.0, 40.0),
                BodyShape::Explicit {
                    offset: Vec2::new(offset, 0.0),
                    size: Vec2::new(11.3 + offset, 20.0),
                },
                1.0,
                params(0.0),
            );
            for _ in 0..60 {
                body.step(&grid, HorizontalIntent::Right, false);
            }

            let right = body.bounding_box().right();
            assert!(right <= 128.0, "offset {} leaves right edge at {}", offset, right);
            assert!(128.0 - right < 1e-3, "offset {} stops short at {}", offset, right);
            assert_eq!(body.velocity().x, 0.0);
        }
    }

    #[test]
    fn test_snap_coordinate_lands_on_target() {
        let above = next_up(next_up(320.0));
        assert_eq!(snap_coordinate(above, 320.0, Limit::AtMost, |c| c), 320.0);

        let below = 320.0 - 2.0 * ulp(320.0);
        assert_eq!(snap_coordinate(below, 320.0, Limit::AtLeast, |c| c), 320.0);

        // Already clear of the target: moved up to it
        assert_eq!(snap_coordinate(below, 320.0, Limit::AtMost, |c| c), 320.0);
    }

    #[test]
    fn test_set_position_resets_motion() {
        let mut body = unit_body(0.0, 0.0, 0.5);
        body.set_velocity(Vec2::new(3.0, 4.0));
        body.set_position(Vec2::new(9.0, 9.0));
        assert_eq!(body.position(), Vec2::new(9.0, 9.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert!(!body.is_grounded());
    }
}
