use std::num::NonZero;

use derive_more::Display;
use new_zealand::nz;

use crate::Shape;

/// How many times the AXPY strategies are repeated in the standard suite.
pub const AXPY_REPETITIONS: NonZero<u64> = nz!(10_000);

/// How many times the expression assignment is repeated in the standard suite.
pub const ASSIGN_REPETITIONS: NonZero<u64> = nz!(2_000);

/// The AXPY coefficient of the standard suite.
pub const AXPY_COEFFICIENT: f64 = 2.7;

/// A group of measurements that share a workload and are reported together.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Family {
    /// `res = a * x + y` over a vector, with three traversal strategies.
    #[display("AXPY 1D BENCHMARK")]
    Axpy,

    /// `res = 3 * x - 2 * y * z` over a rank-3 tensor, as a fused lazy expression.
    #[display("LAZY EXPRESSION ASSIGN BENCHMARK")]
    Assign,
}

impl Family {
    /// All families, in report order.
    pub const ALL: [Self; 2] = [Self::Axpy, Self::Assign];
}

/// Parameters of the AXPY family.
#[derive(Clone, Debug, PartialEq)]
pub struct AxpyConfig {
    /// The shape of every array in the workload.
    pub shape: Shape,

    /// How many timed executions each strategy gets.
    pub repetitions: NonZero<u64>,

    /// The `a` in `a * x + y`.
    pub coefficient: f64,
}

impl AxpyConfig {
    /// A vector of 1000 elements, `a = 2.7`, 10 000 repetitions.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            shape: Shape::from_extents([nz!(1000)]),
            repetitions: AXPY_REPETITIONS,
            coefficient: AXPY_COEFFICIENT,
        }
    }
}

/// Parameters of the expression assignment family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssignConfig {
    /// The shape of every array in the workload. Must be of rank 3.
    pub shape: Shape,

    /// How many timed executions each variant gets.
    pub repetitions: NonZero<u64>,
}

impl AssignConfig {
    /// A `(4, 3, 5)` tensor, 2000 repetitions.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            shape: Shape::from_extents([nz!(4), nz!(3), nz!(5)]),
            repetitions: ASSIGN_REPETITIONS,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn standard_axpy_config() {
        let config = AxpyConfig::standard();

        assert_eq!(config.shape.dims(), &[1000]);
        assert_eq!(config.repetitions.get(), 10_000);
        assert_eq!(config.coefficient.to_bits(), 2.7_f64.to_bits());
    }

    #[test]
    fn standard_assign_config() {
        let config = AssignConfig::standard();

        assert_eq!(config.shape.dims(), &[4, 3, 5]);
        assert_eq!(config.repetitions.get(), 2_000);
    }

    #[test]
    fn family_titles() {
        assert_eq!(Family::Axpy.to_string(), "AXPY 1D BENCHMARK");
        assert_eq!(Family::Assign.to_string(), "LAZY EXPRESSION ASSIGN BENCHMARK");
    }
}
