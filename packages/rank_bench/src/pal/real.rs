//! Real clock implementation using the operating system monotonic clock.

use std::time::{Duration, Instant};

use crate::pal::abstractions::Clock;

/// Real implementation of the clock abstraction using [`std::time::Instant`].
#[derive(Debug, Clone)]
pub(crate) struct RealClock {
    origin: Instant,
}

impl RealClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for RealClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
