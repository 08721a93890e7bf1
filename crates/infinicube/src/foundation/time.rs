//! Time management utilities
//!
//! The animation code never reads a clock itself; it is handed the elapsed time
//! explicitly. [`FrameClock`] is the thing that produces that value, either from
//! the wall clock or from fixed steps for deterministic runs.

use std::time::Instant;

/// Source of elapsed time for the per-frame update
#[derive(Debug, Clone, Copy)]
enum ClockSource {
    /// Real time measured from an [`Instant`]
    Wall(Instant),
    /// Fixed increment per tick, in seconds
    Fixed(f32),
}

/// Monotonic frame clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: ClockSource,
    last_elapsed: f32,
    elapsed: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock that follows real time
    pub fn new() -> Self {
        Self {
            source: ClockSource::Wall(Instant::now()),
            last_elapsed: 0.0,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Create a clock that advances by `step` seconds on every tick
    ///
    /// Non-finite or negative steps are treated as zero.
    pub fn fixed_step(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 { step } else { 0.0 };
        Self {
            source: ClockSource::Fixed(step),
            last_elapsed: 0.0,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock (should be called once per frame) and return the elapsed time
    pub fn tick(&mut self) -> f32 {
        self.last_elapsed = self.elapsed;
        self.elapsed = match self.source {
            ClockSource::Wall(start) => start.elapsed().as_secs_f32(),
            ClockSource::Fixed(step) => self.elapsed + step,
        };
        self.frame_count += 1;
        self.elapsed
    }

    /// Total elapsed time in seconds as of the last tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time between the last two ticks
    pub fn delta_time(&self) -> f32 {
        self.elapsed - self.last_elapsed
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
