//! Frame timing
//!
//! The simulation advances by whatever wall-clock time passed since the last
//! tick, in seconds, clamped so a stalled host can't teleport entities through
//! walls.

use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Monotonic elapsed milliseconds since some fixed origin
pub trait TimeSource {
    fn elapsed_ms(&self) -> u64;
}

/// [`TimeSource`] backed by `std::time::Instant`
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Turns successive clock samples into frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous sample (0 on the first call)
    pub fn delta(&mut self, now_ms: u64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.min(MAX_FRAME_DT)
    }

    /// Sample a time source and return the delta
    pub fn tick(&mut self, source: &impl TimeSource) -> f32 {
        self.delta(source.elapsed_ms())
    }
}
