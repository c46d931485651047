use log::info;
use std::time::{Duration, Instant};

/// Simple timer for logging how long a loading or annotation step took.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new Timer.
    pub fn new() -> Self {
        Timer {
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer was last reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the time taken by `task` since the last reset, then reset the timer.
    pub fn finish(&mut self, task: &str) {
        let elapsed = self.elapsed();
        info!(
            "{} done in {}.{:03} seconds",
            task,
            elapsed.as_secs(),
            elapsed.subsec_millis()
        );
        self.reset();
    }

    /// Reset the timer.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}
