//! Frame timing.

use std::time::{Duration, Instant};

/// Source of the elapsed time between two frames.
pub trait Clock {
    /// Seconds since the previous call, clamped to `[0, max_dt]`.
    /// The first call measures from the clock's creation.
    fn delta(&mut self, max_dt: f32) -> f32;
}

fn clamp_dt(elapsed: Duration, max_dt: f32) -> f32 {
    elapsed.as_secs_f32().clamp(0.0, max_dt.max(0.0))
}

/// Wall clock backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    last_frame: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta(&mut self, max_dt: f32) -> f32 {
        let now = Instant::now();
        let dt = clamp_dt(now.duration_since(self.last_frame), max_dt);
        self.last_frame = now;
        dt
    }
}

/// A clock that only moves when told to.  Used by tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    pending: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.pending += by;
    }
}

impl Clock for ManualClock {
    fn delta(&mut self, max_dt: f32) -> f32 {
        let dt = clamp_dt(self.pending, max_dt);
        self.pending = Duration::ZERO;
        dt
    }
}
