/// Frame clock for the host loop
///
/// The simulation is stepped once per rendered frame with the wall-clock
/// time since the previous frame. Movement constants are per step and tuned
/// for ~60 Hz, so very different frame rates change the feel of the game.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of recent frames averaged for the FPS readout
const FPS_SAMPLES: usize = 60;

pub struct GameLoop {
    started: Instant,
    previous_frame: Instant,
    /// Set while paused; no steps are handed out
    paused_since: Option<Instant>,
    /// Wall time spent paused, excluded from `play_time`
    paused_total: Duration,
    /// Recent frame deltas in seconds, oldest first
    samples: VecDeque<f32>,
    sample_sum: f32,
    frames: u64,
    steps: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            previous_frame: now,
            paused_since: None,
            paused_total: Duration::ZERO,
            samples: VecDeque::with_capacity(FPS_SAMPLES),
            sample_sum: 0.0,
            frames: 0,
            steps: 0,
        }
    }

    /// Mark the start of a rendered frame.
    ///
    /// Returns the seconds since the previous frame, or `None` while paused
    /// (no simulation step should run).
    pub fn begin_frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        let dt = now.duration_since(self.previous_frame).as_secs_f32();
        self.previous_frame = now;
        self.frames += 1;
        self.record_sample(dt);

        if self.paused_since.is_some() {
            return None;
        }

        self.steps += 1;
        Some(dt)
    }

    fn record_sample(&mut self, dt: f32) {
        if self.samples.len() == FPS_SAMPLES {
            if let Some(oldest) = self.samples.pop_front() {
                self.sample_sum -= oldest;
            }
        }
        self.samples.push_back(dt);
        self.sample_sum += dt;
    }

    /// Average frames per second over the recent window
    pub fn fps(&self) -> f32 {
        if self.samples.is_empty() || self.sample_sum <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_sum
    }

    /// Wall time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Unpaused time in seconds
    pub fn play_time(&self) -> f32 {
        let paused = self.paused_total
            + self
                .paused_since
                .map(|since| since.elapsed())
                .unwrap_or_default();
        self.elapsed().saturating_sub(paused).as_secs_f32()
    }

    /// Rendered frames, paused or not
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Simulation steps handed out
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused_since.is_some()
    }

    pub fn pause(&mut self) {
        if self.paused_since.is_none() {
            self.paused_since = Some(Instant::now());
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += since.elapsed();
            // The first step after resuming must not include the pause
            self.previous_frame = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
