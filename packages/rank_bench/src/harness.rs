use std::fmt;
use std::num::NonZero;
use std::time::Duration;

use tracing::trace;

use crate::pal::{Clock, ClockFacade};

/// Times repeated executions of a trial with a monotonic clock.
///
/// # Examples
///
/// ```
/// use std::hint::black_box;
///
/// use new_zealand::nz;
/// use rank_bench::Harness;
///
/// let harness = Harness::new();
///
/// let mut sum = 0_u64;
/// let elapsed = harness.measure(nz!(100), || {
///     sum = black_box(sum) + 1;
/// });
///
/// // One warm-up trial plus 100 timed trials.
/// assert_eq!(sum, 101);
/// println!("100 trials took {elapsed:?}");
/// ```
#[derive(Debug)]
pub struct Harness {
    clock: ClockFacade,
    clock_info: ClockInfo,
}

impl Harness {
    /// Creates a harness that reads the real monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: ClockFacade::real(),
            clock_info: ClockInfo::MONOTONIC,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(clock: ClockFacade) -> Self {
        Self {
            clock,
            clock_info: ClockInfo::MONOTONIC,
        }
    }

    /// Runs `trial` once untimed, then `repetitions` times back-to-back, and returns the total
    /// time taken by the timed executions.
    ///
    /// The warm-up execution absorbs first-call effects (page faults, cold caches, lazy
    /// initialization) and is never counted. The clock is read immediately before the first
    /// timed execution and immediately after the last one, and the returned duration saturates
    /// at zero.
    pub fn measure<F>(&self, repetitions: NonZero<u64>, mut trial: F) -> Duration
    where
        F: FnMut(),
    {
        trial();
        trace!("warm-up trial complete");

        let start = self.clock.now();

        for _ in 0..repetitions.get() {
            trial();
        }

        let end = self.clock.now();

        end.saturating_sub(start)
    }

    /// Describes the clock used for measurements.
    #[must_use]
    pub fn clock_info(&self) -> ClockInfo {
        self.clock_info
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// Characteristics of the measurement clock: its tick period as a fraction of a second and
/// whether it is steady (never adjusted).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockInfo {
    period_numerator: u64,
    period_denominator: u64,
    steady: bool,
}

impl ClockInfo {
    /// The operating system monotonic clock as exposed through [`std::time::Instant`], which
    /// reports time with nanosecond granularity.
    pub const MONOTONIC: Self = Self {
        period_numerator: 1,
        period_denominator: 1_000_000_000,
        steady: true,
    };

    /// Numerator of the tick period in seconds.
    #[must_use]
    pub fn period_numerator(&self) -> u64 {
        self.period_numerator
    }

    /// Denominator of the tick period in seconds.
    #[must_use]
    pub fn period_denominator(&self) -> u64 {
        self.period_denominator
    }

    /// Whether the clock is unaffected by wall clock adjustments.
    #[must_use]
    pub fn is_steady(&self) -> bool {
        self.steady
    }
}

impl fmt::Display for ClockInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Using steady clock")?;
        writeln!(f, "period num: {}", self.period_numerator)?;
        writeln!(f, "period den: {}", self.period_denominator)?;
        writeln!(f, "steady = {}", self.steady)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;

    use new_zealand::nz;

    use super::*;
    use crate::pal::FakeClock;

    #[test]
    fn runs_warm_up_plus_repetitions() {
        let harness = Harness::with_clock(ClockFacade::fake(FakeClock::new()));
        let calls = Cell::new(0_u64);

        _ = harness.measure(nz!(9999), || calls.set(calls.get() + 1));

        assert_eq!(calls.get(), 10_000);
    }

    #[test]
    fn warm_up_is_not_counted() {
        let fake_clock = FakeClock::new();
        let harness = Harness::with_clock(ClockFacade::fake(fake_clock.clone()));

        let elapsed = harness.measure(nz!(5), || fake_clock.advance(Duration::from_millis(1)));

        // Six trials ran, each taking 1 ms of fake time, but only five are timed.
        assert_eq!(fake_clock.now(), Duration::from_millis(6));
        assert_eq!(elapsed, Duration::from_millis(5));
    }

    #[test]
    fn clock_is_read_around_timed_block_only() {
        let fake_clock = FakeClock::new();
        let harness = Harness::with_clock(ClockFacade::fake(fake_clock.clone()));

        fake_clock.advance(Duration::from_secs(100));

        let elapsed = harness.measure(nz!(3), || fake_clock.advance(Duration::from_micros(10)));

        assert_eq!(elapsed, Duration::from_micros(30));
    }

    #[test]
    fn zero_cost_trial_measures_zero() {
        let harness = Harness::with_clock(ClockFacade::fake(FakeClock::new()));

        let elapsed = harness.measure(nz!(1), || {});

        assert_eq!(elapsed, Duration::ZERO);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // Miri cannot use the real operating system APIs.
    fn real_clock_measures_finite_non_negative_time() {
        let harness = Harness::new();

        let elapsed = harness.measure(nz!(1000), || {
            std::hint::black_box(42_u64.wrapping_mul(7));
        });

        let millis = elapsed.as_secs_f64() * 1000.0;
        assert!(millis.is_finite());
        assert!(millis >= 0.0);
    }

    #[test]
    fn clock_info_display() {
        let harness = Harness::new();

        assert_eq!(
            harness.clock_info().to_string(),
            "Using steady clock\nperiod num: 1\nperiod den: 1000000000\nsteady = true\n"
        );
    }

    #[test]
    fn clock_info_accessors() {
        let info = ClockInfo::MONOTONIC;

        assert_eq!(info.period_numerator(), 1);
        assert_eq!(info.period_denominator(), 1_000_000_000);
        assert!(info.is_steady());
    }
}
