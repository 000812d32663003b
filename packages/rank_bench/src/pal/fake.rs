//! Fake clock implementation for testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::pal::abstractions::Clock;

/// Fake implementation of the clock abstraction for testing.
///
/// Time stands still until a test advances it. Multiple clones of the same `FakeClock` share
/// the same underlying time, so a test can keep one clone and advance it from inside a trial
/// while the harness reads another.
#[derive(Clone, Debug)]
pub(crate) struct FakeClock {
    now: Arc<Mutex<Duration>>,
}

impl FakeClock {
    /// Creates a new fake clock at time zero.
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the time of this clock and all its clones forward.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakeClock state lock should not be poisoned");

        *now = now.saturating_add(by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        *self
            .now
            .lock()
            .expect("FakeClock state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = FakeClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn advance_accumulates() {
        let clock = FakeClock::new();

        clock.advance(Duration::from_millis(150));
        clock.advance(Duration::from_millis(50));

        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn shared_state_between_clones() {
        let clock1 = FakeClock::new();
        let clock2 = clock1.clone();

        clock1.advance(Duration::from_millis(100));

        assert_eq!(clock2.now(), Duration::from_millis(100));
    }
}
