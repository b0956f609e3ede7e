// Actor tuning constants

use crate::engine::physics::MotionParams;

/// Fixed movement and timing values for the player actor.
///
/// Movement values are per simulation step (tuned for ~60 Hz); durations
/// are in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorStats {
    // Movement
    /// Horizontal speed while a direction is held (px/step)
    pub move_speed: f32,
    /// Vertical velocity set by a jump (px/step, negative is up)
    pub jump_speed: f32,

    // Physics
    /// Added to vertical velocity every step (px/step²)
    pub gravity: f32,

    // Presentation
    /// Global render scale applied to sprite and tile pixel sizes
    pub render_scale: f32,
}

/// The baseline player tuning
pub const BASE_STATS: ActorStats = ActorStats {
    move_speed: 4.0,
    jump_speed: -10.0,
    gravity: 0.5,
    render_scale: 4.0,
};

impl Default for ActorStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl ActorStats {
    pub fn motion_params(&self) -> MotionParams {
        MotionParams {
            move_speed: self.move_speed,
            gravity: self.gravity,
            jump_speed: self.jump_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = ActorStats::default();
        assert_eq!(stats.move_speed, 4.0);
        assert_eq!(stats.render_scale, 4.0);
        assert!(stats.jump_speed < 0.0, "jumps move up (negative y)");
        assert!(stats.gravity > 0.0, "gravity pulls down (positive y)");
    }

    #[test]
    fn test_motion_params_mirror_stats() {
        let stats = ActorStats {
            move_speed: 3.0,
            jump_speed: -7.0,
            gravity: 0.25,
            render_scale: 2.0,
        };
        let params = stats.motion_params();
        assert_eq!(params.move_speed, 3.0);
        assert_eq!(params.jump_speed, -7.0);
        assert_eq!(params.gravity, 0.25);
    }
}
