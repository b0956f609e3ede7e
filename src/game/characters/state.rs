// Actor animation state machine

use super::animation::AnimationLayout;
use crate::engine::input::HorizontalIntent;

/// Direction the actor is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing implied by a horizontal intent, if any
    pub fn from_intent(intent: HorizontalIntent) -> Option<Self> {
        match intent {
            HorizontalIntent::Left => Some(Self::Left),
            HorizontalIntent::Right => Some(Self::Right),
            HorizontalIntent::None => None,
        }
    }

    /// 1.0 when facing right, -1.0 when facing left
    pub fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// Discrete animation state of the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    IdleRight,
    IdleLeft,
    WalkRight,
    WalkLeft,
    JumpRight,
    JumpLeft,
}

impl AnimationState {
    pub const COUNT: usize = 6;

    /// All states, in frame-strip order
    pub const ALL: [AnimationState; Self::COUNT] = [
        Self::IdleRight,
        Self::IdleLeft,
        Self::WalkRight,
        Self::WalkLeft,
        Self::JumpRight,
        Self::JumpLeft,
    ];

    pub fn idle(facing: Facing) -> Self {
        match facing {
            Facing::Right => Self::IdleRight,
            Facing::Left => Self::IdleLeft,
        }
    }

    pub fn walk(facing: Facing) -> Self {
        match facing {
            Facing::Right => Self::WalkRight,
            Facing::Left => Self::WalkLeft,
        }
    }

    pub fn jump(facing: Facing) -> Self {
        match facing {
            Facing::Right => Self::JumpRight,
            Facing::Left => Self::JumpLeft,
        }
    }

    /// Position in [`AnimationState::ALL`]
    pub fn index(self) -> usize {
        match self {
            Self::IdleRight => 0,
            Self::IdleLeft => 1,
            Self::WalkRight => 2,
            Self::WalkLeft => 3,
            Self::JumpRight => 4,
            Self::JumpLeft => 5,
        }
    }

    pub fn facing(self) -> Facing {
        match self {
            Self::IdleRight | Self::WalkRight | Self::JumpRight => Facing::Right,
            Self::IdleLeft | Self::WalkLeft | Self::JumpLeft => Facing::Left,
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Self::IdleRight | Self::IdleLeft)
    }

    pub fn is_walk(self) -> bool {
        matches!(self, Self::WalkRight | Self::WalkLeft)
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Self::JumpRight | Self::JumpLeft)
    }

    /// Get the animation name for this state
    pub fn animation_name(self) -> &'static str {
        match self {
            Self::IdleRight => "idle_right",
            Self::IdleLeft => "idle_left",
            Self::WalkRight => "walk_right",
            Self::WalkLeft => "walk_left",
            Self::JumpRight => "jump_right",
            Self::JumpLeft => "jump_left",
        }
    }
}

/// Derives the animation state from movement intent and ground contact and
/// steps the frame within the state's band
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    layout: AnimationLayout,
    current_state: AnimationState,
    previous_state: AnimationState,
    /// Remembered from the last walk or jump direction
    facing: Facing,
    /// Band-local frame index
    frame: usize,
    /// Seconds since the last frame advance
    frame_timer: f32,
    grounded: bool,
}

impl AnimationStateMachine {
    pub fn new(layout: AnimationLayout) -> Self {
        Self {
            layout,
            current_state: AnimationState::default(),
            previous_state: AnimationState::default(),
            facing: Facing::default(),
            frame: 0,
            frame_timer: 0.0,
            grounded: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> AnimationState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Frame index within the current state's band
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Frame index within the whole strip, for sprite lookup
    pub fn strip_frame(&self) -> usize {
        self.layout.band(self.current_state).start + self.frame
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn layout(&self) -> &AnimationLayout {
        &self.layout
    }

    /// Transition to a new state, restarting its band
    fn transition(&mut self, new_state: AnimationState) {
        if self.current_state != new_state {
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.frame = 0;
            self.frame_timer = 0.0;
        }
    }

    /// Update the state machine (called every step).
    ///
    /// `jumped` is the accepted jump edge for this step and `grounded` the
    /// ground contact after the step's collision resolution.
    pub fn update(&mut self, intent: HorizontalIntent, jumped: bool, grounded: bool, dt: f32) {
        self.grounded = grounded;
        let state = self.current_state;

        // 1. Horizontal input. Airborne jumps keep the jump pose and only turn.
        if let Some(facing) = Facing::from_intent(intent) {
            self.facing = facing;
            if state.is_jump() && !grounded {
                self.transition(AnimationState::jump(facing));
            } else {
                self.transition(AnimationState::walk(facing));
            }
        }

        // 2. Jump edge from the ground states
        let state = self.current_state;
        if jumped && (state.is_walk() || state.is_idle()) {
            self.transition(AnimationState::jump(self.facing));
        }

        // 3. No input: settle to idle. Jumps settle only once back on the ground.
        let state = self.current_state;
        if intent.is_none() && (state.is_walk() || (state.is_jump() && grounded)) {
            self.transition(AnimationState::idle(self.facing));
        }

        self.advance_frame(dt);
    }

    fn advance_frame(&mut self, dt: f32) {
        let state = self.current_state;

        if state.is_jump() && !self.grounded {
            // Hold the apex pose while airborne
            self.frame = self.layout.band(state).last();
            self.frame_timer = 0.0;
            return;
        }

        self.frame_timer += dt;
        if self.frame_timer >= self.layout.frame_duration() {
            self.frame_timer = 0.0;
            self.frame = self.layout.next_frame(state, self.frame);
        }
    }

    /// Return to the initial idle state (respawn)
    pub fn reset(&mut self) {
        self.current_state = AnimationState::default();
        self.previous_state = AnimationState::default();
        self.facing = Facing::default();
        self.frame = 0;
        self.frame_timer = 0.0;
        self.grounded = false;
    }
}
