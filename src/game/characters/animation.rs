// Frame band layout for the actor's animation strip

use super::state::AnimationState;

/// Seconds per animation frame in the reference layout
pub const DEFAULT_FRAME_DURATION: f32 = 0.15;

/// A contiguous run of frames in the animation strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBand {
    /// Strip index of the first frame
    pub start: usize,
    /// Number of frames
    pub len: usize,
}

impl FrameBand {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Strip index one past the last frame
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Band-local index of the last frame
    pub fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }
}

/// Layout validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Frame band for {0:?} is empty")]
    EmptyBand(AnimationState),

    #[error("Frame band for {state:?} ends at {end}, past the strip length {strip_len}")]
    BandOutOfStrip {
        state: AnimationState,
        end: usize,
        strip_len: usize,
    },

    #[error("Frame duration must be positive, got {0}")]
    InvalidFrameDuration(f32),

    #[error("Attack sequence has no frames")]
    EmptyAttack,
}

/// Where each animation state's frames live in the strip, and how fast
/// they play
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationLayout {
    /// Indexed by [`AnimationState::index`]
    bands: [FrameBand; AnimationState::COUNT],
    strip_len: usize,
    frame_duration: f32,
    /// Walk bands wrap one frame early: `(frame + 1) % (len - 1)`
    walk_wrap_quirk: bool,
}

impl AnimationLayout {
    /// Build a layout from per-state bands ordered as [`AnimationState::ALL`]
    pub fn new(
        bands: [FrameBand; AnimationState::COUNT],
        strip_len: usize,
        frame_duration: f32,
    ) -> Result<Self, LayoutError> {
        if !(frame_duration > 0.0) {
            return Err(LayoutError::InvalidFrameDuration(frame_duration));
        }

        for (state, band) in AnimationState::ALL.iter().zip(bands.iter()) {
            if band.len == 0 {
                return Err(LayoutError::EmptyBand(*state));
            }
            if band.end() > strip_len {
                return Err(LayoutError::BandOutOfStrip {
                    state: *state,
                    end: band.end(),
                    strip_len,
                });
            }
        }

        Ok(Self {
            bands,
            strip_len,
            frame_duration,
            walk_wrap_quirk: true,
        })
    }

    /// The player sheet layout: a 12-frame strip with two frames per state,
    /// in the order idle right, idle left, walk right, walk left, jump right,
    /// jump left.
    pub fn reference() -> Self {
        Self {
            bands: [
                FrameBand::new(0, 2),
                FrameBand::new(2, 2),
                FrameBand::new(4, 2),
                FrameBand::new(6, 2),
                FrameBand::new(8, 2),
                FrameBand::new(10, 2),
            ],
            strip_len: 12,
            frame_duration: DEFAULT_FRAME_DURATION,
            walk_wrap_quirk: true,
        }
    }

    /// Enable or disable the early wrap of walk bands
    pub fn with_walk_wrap_quirk(mut self, enabled: bool) -> Self {
        self.walk_wrap_quirk = enabled;
        self
    }

    pub fn band(&self, state: AnimationState) -> FrameBand {
        self.bands[state.index()]
    }

    pub fn strip_len(&self) -> usize {
        self.strip_len
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn walk_wrap_quirk(&self) -> bool {
        self.walk_wrap_quirk
    }

    /// Band-local frame that follows `frame` when cycling `state`
    pub fn next_frame(&self, state: AnimationState, frame: usize) -> usize {
        let band = self.band(state);
        let modulus = if self.walk_wrap_quirk && state.is_walk() && band.len > 1 {
            band.len - 1
        } else {
            band.len
        };
        (frame + 1) % modulus
    }
}

impl Default for AnimationLayout {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands_of(len: usize) -> [FrameBand; AnimationState::COUNT] {
        [
            FrameBand::new(0, len),
            FrameBand::new(len, len),
            FrameBand::new(2 * len, len),
            FrameBand::new(3 * len, len),
            FrameBand::new(4 * len, len),
            FrameBand::new(5 * len, len),
        ]
    }

    #[test]
    fn test_reference_layout() {
        let layout = AnimationLayout::reference();
        assert_eq!(layout.strip_len(), 12);
        assert_eq!(layout.band(AnimationState::IdleRight), FrameBand::new(0, 2));
        assert_eq!(layout.band(AnimationState::WalkLeft), FrameBand::new(6, 2));
        assert_eq!(layout.band(AnimationState::JumpLeft), FrameBand::new(10, 2));
        assert!(layout.walk_wrap_quirk());
    }

    #[test]
    fn test_reference_layout_validates() {
        let reference = AnimationLayout::reference();
        let rebuilt = AnimationLayout::new(bands_of(2), 12, DEFAULT_FRAME_DURATION).unwrap();
        assert_eq!(reference, rebuilt);
    }

    #[test]
    fn test_rejects_empty_band() {
        let mut bands = bands_of(2);
        bands[3] = FrameBand::new(6, 0);
        assert_eq!(
            AnimationLayout::new(bands, 12, 0.1),
            Err(LayoutError::EmptyBand(AnimationState::WalkLeft))
        );
    }

    #[test]
    fn test_rejects_band_past_strip() {
        assert!(matches!(
            AnimationLayout::new(bands_of(2), 11, 0.1),
            Err(LayoutError::BandOutOfStrip { end: 12, strip_len: 11, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_frame_duration() {
        assert!(AnimationLayout::new(bands_of(2), 12, 0.0).is_err());
        assert!(AnimationLayout::new(bands_of(2), 12, f32::NAN).is_err());
    }

    #[test]
    fn test_idle_cycles_whole_band() {
        let layout = AnimationLayout::new(bands_of(4), 24, 0.1).unwrap();
        let frames: Vec<usize> = (0..5)
            .scan(0, |f, _| {
                *f = layout.next_frame(AnimationState::IdleLeft, *f);
                Some(*f)
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_walk_wraps_one_frame_early() {
        let layout = AnimationLayout::new(bands_of(4), 24, 0.1).unwrap();
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 0), 1);
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 1), 2);
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 2), 0);

        // Two-frame walk bands never leave their first frame
        let reference = AnimationLayout::reference();
        assert_eq!(reference.next_frame(AnimationState::WalkLeft, 0), 0);
    }

    #[test]
    fn test_walk_quirk_can_be_disabled() {
        let layout = AnimationLayout::new(bands_of(4), 24, 0.1)
            .unwrap()
            .with_walk_wrap_quirk(false);
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 2), 3);
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 3), 0);
    }

    #[test]
    fn test_single_frame_walk_band() {
        let mut bands = bands_of(2);
        bands[2] = FrameBand::new(4, 1);
        let layout = AnimationLayout::new(bands, 12, 0.1).unwrap();
        assert_eq!(layout.next_frame(AnimationState::WalkRight, 0), 0);
    }

    #[test]
    fn test_frame_band_helpers() {
        let band = FrameBand::new(4, 3);
        assert_eq!(band.end(), 7);
        assert_eq!(band.last(), 2);
    }
}
