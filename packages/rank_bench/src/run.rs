use std::hint::black_box;
use std::num::NonZero;

use ndarray::{Array1, Array3, ArrayD};
use tracing::debug;

use crate::{
    AssignConfig, AssignWorkload, AxpyConfig, AxpyStrategy, AxpyWorkload, Container, Family,
    Harness, Measurement, Report, ReportBlock, Result, Strategy, Variant,
};

/// The configuration of every benchmark family.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use rank_bench::{Family, Harness, Suite};
///
/// let mut suite = Suite::standard();
/// suite.axpy.repetitions = nz!(10);
/// suite.assign.repetitions = nz!(10);
///
/// let report = suite.run(&Harness::new())?;
///
/// assert_eq!(report.block(Family::Axpy).unwrap().measurements().len(), 6);
/// assert_eq!(report.block(Family::Assign).unwrap().measurements().len(), 2);
/// # Ok::<(), rank_bench::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Suite {
    /// Parameters of the AXPY family.
    pub axpy: AxpyConfig,

    /// Parameters of the expression assignment family.
    pub assign: AssignConfig,
}

impl Suite {
    /// The fixed workloads this crate exists to measure.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            axpy: AxpyConfig::standard(),
            assign: AssignConfig::standard(),
        }
    }

    /// Runs every family in report order.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured shape cannot be used to build its workload.
    pub fn run(&self, harness: &Harness) -> Result<Report> {
        let blocks = Family::ALL
            .iter()
            .map(|family| match family {
                Family::Axpy => run_axpy(&self.axpy, harness),
                Family::Assign => run_assign(&self.assign, harness),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Report::new(harness.clock_info(), blocks))
    }
}

/// Measures the three AXPY strategies on both container variants.
///
/// Each variant gets its own freshly generated workload. Measurements are ordered by strategy,
/// then by variant (rank-dynamic first). Every strategy gets an untimed warm-up execution before
/// its timed block.
///
/// # Errors
///
/// Returns an error if the configured shape is not one-dimensional.
pub fn run_axpy(config: &AxpyConfig, harness: &Harness) -> Result<ReportBlock> {
    let mut dynamic = AxpyWorkload::<ArrayD<f64>>::generate(&config.shape, config.coefficient)?;
    let mut fixed = AxpyWorkload::<Array1<f64>>::generate(&config.shape, config.coefficient)?;

    let mut measurements = Vec::with_capacity(AxpyStrategy::ALL.len() * Variant::ALL.len());

    for strategy in AxpyStrategy::ALL {
        measurements.push(measure_axpy(harness, config.repetitions, strategy, &mut dynamic));
        measurements.push(measure_axpy(harness, config.repetitions, strategy, &mut fixed));
    }

    Ok(ReportBlock::new(Family::Axpy, measurements))
}

/// Measures the lazy expression assignment on both container variants.
///
/// # Errors
///
/// Returns an error if the configured shape is not of rank 3.
pub fn run_assign(config: &AssignConfig, harness: &Harness) -> Result<ReportBlock> {
    let mut dynamic = AssignWorkload::<ArrayD<f64>>::generate(&config.shape)?;
    let mut fixed = AssignWorkload::<Array3<f64>>::generate(&config.shape)?;

    let measurements = vec![
        measure_assign(harness, config.repetitions, &mut dynamic),
        measure_assign(harness, config.repetitions, &mut fixed),
    ];

    Ok(ReportBlock::new(Family::Assign, measurements))
}

fn measure_axpy<C: Container>(
    harness: &Harness,
    repetitions: NonZero<u64>,
    strategy: AxpyStrategy,
    workload: &mut AxpyWorkload<C>,
) -> Measurement {
    let variant = workload.variant();

    match strategy {
        AxpyStrategy::Linear => measure(
            harness,
            repetitions,
            strategy.into(),
            variant,
            workload,
            AxpyWorkload::iterate_linear,
        ),
        AxpyStrategy::Structured => measure(
            harness,
            repetitions,
            strategy.into(),
            variant,
            workload,
            AxpyWorkload::iterate_structured,
        ),
        AxpyStrategy::Indexed => measure(
            harness,
            repetitions,
            strategy.into(),
            variant,
            workload,
            AxpyWorkload::iterate_indexed,
        ),
    }
}

fn measure_assign<C: Container>(
    harness: &Harness,
    repetitions: NonZero<u64>,
    workload: &mut AssignWorkload<C>,
) -> Measurement {
    let variant = workload.variant();

    measure(
        harness,
        repetitions,
        Strategy::LazyAssign,
        variant,
        workload,
        AssignWorkload::assign_lazy,
    )
}

/// Times `kernel` on `workload` and logs the outcome.
///
/// The workload passes through `black_box()` on every trial so the optimizer cannot hoist the
/// computation out of the repetition loop.
fn measure<W, K>(
    harness: &Harness,
    repetitions: NonZero<u64>,
    strategy: Strategy,
    variant: Variant,
    workload: &mut W,
    mut kernel: K,
) -> Measurement
where
    K: FnMut(&mut W),
{
    let elapsed = harness.measure(repetitions, || kernel(black_box(&mut *workload)));

    debug!(
        %strategy,
        %variant,
        repetitions = repetitions.get(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "measured strategy"
    );

    Measurement::new(variant, strategy, repetitions, elapsed)
}
