//! Step pacing.
//!
//! Searches pause between steps purely so a renderer can show each
//! intermediate state. The pause goes through a [`Clock`] so tests and
//! headless callers can run the same loop without waiting.

use std::time::Duration;

/// Something that can pause the calling loop.
pub trait Clock {
    /// Pause for `d`.
    fn sleep(&mut self, d: Duration);
}

/// Wall-clock pacing: blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, d: Duration) {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}

/// A clock that never waits and only records what was asked of it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: Duration,
    sleeps: usize,
}

impl ManualClock {
    /// Create a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested pauses.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of `sleep` calls.
    pub fn sleeps(&self) -> usize {
        self.sleeps
    }
}

impl Clock for ManualClock {
    fn sleep(&mut self, d: Duration) {
        self.elapsed += d;
        self.sleeps += 1;
    }
}
