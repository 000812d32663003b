//! Benchmark results and their console layout.

use std::fmt;
use std::num::NonZero;
use std::time::Duration;

use crate::{ClockInfo, Family, Strategy, Variant};

/// The total time taken by the timed repetitions of one strategy on one container variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Measurement {
    variant: Variant,
    strategy: Strategy,
    repetitions: NonZero<u64>,
    elapsed: Duration,
}

impl Measurement {
    /// Records the outcome of a timed block.
    #[must_use]
    pub fn new(
        variant: Variant,
        strategy: Strategy,
        repetitions: NonZero<u64>,
        elapsed: Duration,
    ) -> Self {
        Self {
            variant,
            strategy,
            repetitions,
            elapsed,
        }
    }

    /// The container variant that was measured.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The strategy that was measured.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// How many timed repetitions the elapsed time covers.
    #[must_use]
    pub fn repetitions(&self) -> NonZero<u64> {
        self.repetitions
    }

    /// The total time of all timed repetitions.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The total time of all timed repetitions in fractional milliseconds.
    #[must_use]
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // derive_more output ignores width flags, so pad the rendered names instead.
        let variant = self.variant.to_string();
        let strategy = self.strategy.to_string();

        write!(f, "{variant:<7} {strategy:>10}: {}ms", self.millis())
    }
}

/// The measurements of one benchmark family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportBlock {
    family: Family,
    measurements: Vec<Measurement>,
}

impl ReportBlock {
    /// Groups the measurements of a family, keeping their order.
    #[must_use]
    pub fn new(family: Family, measurements: Vec<Measurement>) -> Self {
        Self {
            family,
            measurements,
        }
    }

    /// The family the measurements belong to.
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// The measurements in the order they were taken.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Finds the measurement of a specific strategy on a specific variant.
    #[must_use]
    pub fn get(&self, variant: Variant, strategy: Strategy) -> Option<&Measurement> {
        self.measurements
            .iter()
            .find(|m| m.variant == variant && m.strategy == strategy)
    }
}

impl fmt::Display for ReportBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.family.to_string();
        let stars = "*".repeat(title.len() + 10);

        writeln!(f, "{stars}")?;
        writeln!(f, "*    {title}    *")?;
        writeln!(f, "{stars}")?;
        writeln!(f)?;

        for measurement in &self.measurements {
            writeln!(f, "{measurement}")?;
        }

        Ok(())
    }
}

/// Everything one run of the benchmark suite produced.
///
/// The `Display` implementation renders the console layout: the clock banner, a blank line and
/// then every block, each followed by a blank line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    clock: ClockInfo,
    blocks: Vec<ReportBlock>,
}

impl Report {
    /// Combines the clock description with the blocks of a run.
    #[must_use]
    pub fn new(clock: ClockInfo, blocks: Vec<ReportBlock>) -> Self {
        Self { clock, blocks }
    }

    /// The clock the measurements were taken with.
    #[must_use]
    pub fn clock(&self) -> ClockInfo {
        self.clock
    }

    /// The blocks in report order.
    #[must_use]
    pub fn blocks(&self) -> &[ReportBlock] {
        &self.blocks
    }

    /// The block of a specific family, if it was run.
    #[must_use]
    pub fn block(&self, family: Family) -> Option<&ReportBlock> {
        self.blocks.iter().find(|block| block.family == family)
    }

    /// Prints the report to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.clock)?;

        for block in &self.blocks {
            writeln!(f, "{block}")?;
        }

        Ok(())
    }
}
