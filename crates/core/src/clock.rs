//! Clock sources for driving the simulation.
//!
//! The game only needs monotonically increasing milliseconds; the runner
//! uses [`MonotonicClock`] and tests step a [`ManualClock`] by hand.

use std::time::Instant;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&mut self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward. Negative steps are ignored.
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now_ms += ms;
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        self.now_ms
    }
}
