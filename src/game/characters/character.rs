// Player actor: movement, animation and combat stepped together

use glam::Vec2;

use super::animation::{AnimationLayout, LayoutError};
use super::combat::{AttackConfig, CombatOverlay};
use super::events::{ActorEvent, EventSink};
use super::state::{AnimationState, AnimationStateMachine, Facing};
use super::stats::ActorStats;
use crate::core::Rect;
use crate::engine::input::{Action, HorizontalIntent, PlayerInput};
use crate::engine::physics::{BodyShape, MotionBody, StepOutcome};
use crate::engine::tiles::TileGrid;

/// Input snapshot consumed by one actor step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorInput {
    pub intent: HorizontalIntent,
    /// Jump was newly pressed this step
    pub jump_pressed: bool,
    /// Attack was newly pressed this step
    pub attack_pressed: bool,
}

impl ActorInput {
    pub fn from_player(input: &PlayerInput) -> Self {
        Self {
            intent: input.horizontal_intent(),
            jump_pressed: input.just_pressed(Action::Jump),
            attack_pressed: input.just_pressed(Action::Attack),
        }
    }
}

/// Everything needed to spawn an actor
#[derive(Debug, Clone)]
pub struct ActorConfig {
    pub stats: ActorStats,
    pub layout: AnimationLayout,
    /// Movement frame size in sprite pixels
    pub frame_size: Vec2,
    /// World-space `(offset, size)` box replacing the frame-derived one
    pub hitbox: Option<(Vec2, Vec2)>,
    /// Attack capability; `None` leaves combat inert
    pub attack: Option<AttackConfig>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            stats: ActorStats::default(),
            layout: AnimationLayout::default(),
            frame_size: Vec2::new(32.0, 32.0),
            hitbox: None,
            attack: None,
        }
    }
}

impl ActorConfig {
    pub fn with_stats(mut self, stats: ActorStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_layout(mut self, layout: AnimationLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_frame_size(mut self, frame_size: Vec2) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_hitbox(mut self, offset: Vec2, size: Vec2) -> Self {
        self.hitbox = Some((offset, size));
        self
    }

    pub fn with_attack(mut self, attack: AttackConfig) -> Self {
        self.attack = Some(attack);
        self
    }

    fn body_shape(&self) -> BodyShape {
        match self.hitbox {
            Some((offset, size)) => BodyShape::Explicit { offset, size },
            None => BodyShape::Frame {
                frame_size: self.frame_size,
            },
        }
    }
}

/// The player actor.
///
/// Each step runs movement, then animation, then combat, then publishes
/// the step's events to the supplied sink.
#[derive(Debug, Clone)]
pub struct ActorController {
    body: MotionBody,
    animation: AnimationStateMachine,
    combat: Option<CombatOverlay>,
}

impl ActorController {
    pub fn new(spawn: Vec2, config: ActorConfig) -> Result<Self, LayoutError> {
        let scale = config.stats.render_scale;
        let body = MotionBody::new(
            spawn,
            config.body_shape(),
            scale,
            config.stats.motion_params(),
        );

        let combat = match config.attack {
            Some(attack) => Some(CombatOverlay::new(attack, scale)?),
            None => None,
        };

        Ok(Self {
            body,
            animation: AnimationStateMachine::new(config.layout),
            combat,
        })
    }

    /// Advance the actor by one simulation step of `dt` seconds.
    ///
    /// Negative or non-finite `dt` counts as zero.
    pub fn step<S: EventSink>(
        &mut self,
        grid: &TileGrid,
        input: ActorInput,
        dt: f32,
        events: &mut S,
    ) -> StepOutcome {
        let dt = sanitize_dt(dt);

        let outcome = self.body.step(grid, input.intent, input.jump_pressed);
        let grounded = self.body.is_grounded();

        self.animation
            .update(input.intent, outcome.jumped, grounded, dt);

        if outcome.jumped {
            log::debug!("Jumped from {:?}", self.body.position());
            events.emit(ActorEvent::Jumped);
        }
        if outcome.landed {
            log::debug!("Landed at {:?}", self.body.position());
            events.emit(ActorEvent::Landed);
        }

        if let Some(combat) = self.combat.as_mut() {
            let update = combat.update(
                dt,
                input.attack_pressed,
                grounded,
                self.animation.facing(),
                self.body.bounding_box(),
            );
            if update.started {
                events.emit(ActorEvent::AttackStarted);
            }
            if let Some(hit) = update.hit {
                events.emit(ActorEvent::AttackHitActive(hit));
            }
        }

        outcome
    }

    /// Move the actor to `position` and reset its motion, animation and
    /// combat state
    pub fn respawn(&mut self, position: Vec2) {
        self.body.set_position(position);
        self.animation.reset();
        if let Some(combat) = self.combat.as_mut() {
            combat.reset();
        }
    }

    /// World-space bounding box
    pub fn bounding_box(&self) -> Rect {
        self.body.bounding_box()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    pub fn is_grounded(&self) -> bool {
        self.body.is_grounded()
    }

    pub fn facing(&self) -> Facing {
        self.animation.facing()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Frame within the current state's band
    pub fn frame_index(&self) -> usize {
        self.animation.frame()
    }

    /// Frame within the whole movement strip
    pub fn strip_frame(&self) -> usize {
        self.animation.strip_frame()
    }

    pub fn body(&self) -> &MotionBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut MotionBody {
        &mut self.body
    }

    pub fn animation(&self) -> &AnimationStateMachine {
        &self.animation
    }

    pub fn combat(&self) -> Option<&CombatOverlay> {
        self.combat.as_ref()
    }

    /// Active attack hit rectangle, if any
    pub fn hit_rect(&self) -> Option<Rect> {
        self.combat.as_ref().and_then(CombatOverlay::hit_rect)
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}
