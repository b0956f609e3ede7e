// Timed attack layered on top of movement
//
// The overlay runs its own frame cadence, independent of the movement
// animation, and exposes a hit rectangle during the middle third of the
// attack sequence.

use super::animation::LayoutError;
use super::state::Facing;
use crate::core::Rect;
use glam::Vec2;

/// Remaining cooldown at or below this many seconds counts as expired
/// (absorbs `f32` drift from subtracting per-frame deltas)
const COOLDOWN_TOLERANCE: f32 = 1e-3;

/// Attack timing and hit geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackConfig {
    /// Frames in the attack sequence
    pub frame_count: usize,
    /// Seconds per attack frame
    pub frame_duration: f32,
    /// Seconds before another attack may start, counted from the trigger
    pub cooldown: f32,
    /// Attack frame size in sprite pixels
    pub frame_size: Vec2,
    /// Hit rectangle size as a fraction of the scaled attack frame
    pub hit_size_fraction: Vec2,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            frame_count: 6,
            frame_duration: 0.08,
            cooldown: 0.5,
            frame_size: Vec2::new(32.0, 32.0),
            hit_size_fraction: Vec2::new(0.5, 0.5),
        }
    }
}

impl AttackConfig {
    /// Attack config sized from the attack sheet's frames
    pub fn from_frames(frame_count: usize, frame_size: Vec2) -> Self {
        Self {
            frame_count,
            frame_size,
            ..Default::default()
        }
    }

    /// First frame (inclusive) and last frame (exclusive) of the hit window
    pub fn hit_window(&self) -> (usize, usize) {
        (self.frame_count / 3, 2 * self.frame_count / 3)
    }
}

/// Attack sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatState {
    #[default]
    Idle,
    Attacking,
}

/// Result of one combat update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatUpdate {
    /// An attack started this step
    pub started: bool,
    /// Active hit rectangle after this step
    pub hit: Option<Rect>,
}

#[derive(Debug, Clone)]
pub struct CombatOverlay {
    config: AttackConfig,
    /// Render scale applied to the attack frame size
    scale: f32,
    state: CombatState,
    frame: usize,
    frame_timer: f32,
    cooldown_remaining: f32,
    hit_rect: Option<Rect>,
}

impl CombatOverlay {
    pub fn new(config: AttackConfig, scale: f32) -> Result<Self, LayoutError> {
        if config.frame_count == 0 {
            return Err(LayoutError::EmptyAttack);
        }
        if !(config.frame_duration > 0.0) {
            return Err(LayoutError::InvalidFrameDuration(config.frame_duration));
        }

        Ok(Self {
            config,
            scale,
            state: CombatState::Idle,
            frame: 0,
            frame_timer: 0.0,
            cooldown_remaining: 0.0,
            hit_rect: None,
        })
    }

    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn is_attacking(&self) -> bool {
        self.state == CombatState::Attacking
    }

    /// Current frame within the attack sequence
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Hit rectangle from the last update, if the hit window is open
    pub fn hit_rect(&self) -> Option<Rect> {
        self.hit_rect
    }

    /// Advance the attack by `dt` seconds.
    ///
    /// The cooldown decays first, then a running attack advances (and may
    /// finish), then a new attack may start. `body` is the actor's bounding
    /// box after this step's movement.
    pub fn update(
        &mut self,
        dt: f32,
        trigger: bool,
        grounded: bool,
        facing: Facing,
        body: Rect,
    ) -> CombatUpdate {
        let mut result = CombatUpdate::default();

        self.cooldown_remaining = decay_cooldown(self.cooldown_remaining, dt);

        if self.state == CombatState::Attacking {
            self.frame_timer += dt;
            while self.frame_timer >= self.config.frame_duration {
                self.frame_timer -= self.config.frame_duration;
                self.frame += 1;

                if self.frame >= self.config.frame_count {
                    self.finish();
                    break;
                }
            }
        }

        if self.state == CombatState::Idle
            && trigger
            && grounded
            && self.cooldown_remaining == 0.0
        {
            self.state = CombatState::Attacking;
            self.frame = 0;
            self.frame_timer = 0.0;
            self.cooldown_remaining = self.config.cooldown;
            result.started = true;
            log::debug!("Attack started facing {:?}", facing);
        }

        self.hit_rect = if self.in_hit_window() {
            Some(self.hit_rect_for(facing, body))
        } else {
            None
        };
        result.hit = self.hit_rect;
        result
    }

    fn finish(&mut self) {
        self.state = CombatState::Idle;
        self.frame = 0;
        self.frame_timer = 0.0;
        self.hit_rect = None;
    }

    fn in_hit_window(&self) -> bool {
        let (start, end) = self.config.hit_window();
        self.state == CombatState::Attacking && self.frame >= start && self.frame < end
    }

    /// Hit rectangle in front of `body`, vertically centred on it
    fn hit_rect_for(&self, facing: Facing, body: Rect) -> Rect {
        let size = self.config.frame_size * self.scale * self.config.hit_size_fraction;
        let x = match facing {
            Facing::Right => body.right(),
            Facing::Left => body.left() - size.x,
        };
        let y = body.center().y - size.y / 2.0;
        Rect::new(x, y, size.x, size.y)
    }

    /// Cancel any running attack and clear the cooldown
    pub fn reset(&mut self) {
        self.finish();
        self.cooldown_remaining = 0.0;
    }
}

fn decay_cooldown(remaining: f32, dt: f32) -> f32 {
    let remaining = remaining - dt;
    if remaining <= COOLDOWN_TOLERANCE {
        0.0
    } else {
        remaining
    }
}
