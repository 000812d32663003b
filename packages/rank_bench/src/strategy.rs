use derive_more::Display;

use crate::Container;
use crate::shape::IndexCursor;

/// A way of computing a workload's result, as named in reports.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Strategy {
    /// Lock-step traversal of flat storage-order iterators.
    #[display("iteration")]
    LinearIteration,

    /// Lock-step traversal of shape and stride aware iterators.
    #[display("xiteration")]
    StructuredIteration,

    /// Explicit positional traversal with a multi-index accessor call per element.
    #[display("indexing")]
    Indexing,

    /// Assignment of a fused, lazily evaluated elementwise expression.
    #[display("assign")]
    LazyAssign,
}

/// The strategies that compute `res = a * x + y`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AxpyStrategy {
    /// See [`axpy_linear()`].
    Linear,

    /// See [`axpy_structured()`].
    Structured,

    /// See [`axpy_indexed()`].
    Indexed,
}

impl AxpyStrategy {
    /// All AXPY strategies, in report order.
    pub const ALL: [Self; 3] = [Self::Linear, Self::Structured, Self::Indexed];
}

impl From<AxpyStrategy> for Strategy {
    fn from(value: AxpyStrategy) -> Self {
        match value {
            AxpyStrategy::Linear => Self::LinearIteration,
            AxpyStrategy::Structured => Self::StructuredIteration,
            AxpyStrategy::Indexed => Self::Indexing,
        }
    }
}

/// Computes `res = a * x + y` by walking the flat storage of all three arrays in lock-step.
///
/// The multi-dimensional structure is ignored entirely, which is only valid because all the
/// arrays have the same shape and therefore the same storage order.
pub fn axpy_linear<C: Container>(a: f64, x: &C, y: &C, res: &mut C) {
    for ((r, &xi), &yi) in res.flat_mut().iter_mut().zip(x.flat()).zip(y.flat()) {
        *r = a * xi + yi;
    }
}

/// Computes `res = a * x + y` by walking the structure-aware iterators of all three arrays in
/// lock-step.
///
/// The iterators visit elements in logical order using the shape and strides of each array,
/// even when that order coincides with storage order.
pub fn axpy_structured<C: Container>(a: f64, x: &C, y: &C, res: &mut C) {
    for ((r, &xi), &yi) in res.structured_mut().zip(x.structured()).zip(y.structured()) {
        *r = a * xi + yi;
    }
}

/// Computes `res = a * x + y` position by position, reading and writing every element through
/// the multi-index accessors of the arrays.
///
/// For a one-dimensional workload the multi-index is just the position. Higher ranks advance the
/// multi-index in row-major order.
pub fn axpy_indexed<C: Container>(a: f64, x: &C, y: &C, res: &mut C) {
    let dims = x.dims();
    let element_count: usize = dims.iter().product();

    let mut cursor = IndexCursor::new(dims);

    for _ in 0..element_count {
        let index = cursor.index();
        *res.at_mut(index) = a * x.at(index) + y.at(index);

        cursor.advance();
    }
}

/// Computes `res = 3 * x - 2 * y * z` as a single lazily evaluated expression.
///
/// Neither `3 * x` nor `2 * y * z` is materialized. Every element of `res` is produced by one
/// evaluation of the whole expression at that position.
pub fn assign_lazy<C: Container>(x: &C, y: &C, z: &C, res: &mut C) {
    let expr = 3.0 * x.lazy() - 2.0 * y.lazy() * z.lazy();

    res.assign_expr(&expr);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use ndarray::{Array1, Array3, ArrayD};
    use new_zealand::nz;

    use super::*;
    use crate::{AssignWorkload, AxpyWorkload, Shape};

    fn axpy_all_strategies<C: Container>(shape: &Shape) -> [Vec<f64>; 3] {
        let mut workload = AxpyWorkload::<C>::generate(shape, 2.7).unwrap();

        workload.iterate_linear();
        let linear = workload.result().flat().to_vec();

        workload.iterate_structured();
        let structured = workload.result().flat().to_vec();

        workload.iterate_indexed();
        let indexed = workload.result().flat().to_vec();

        [linear, structured, indexed]
    }

    #[test]
    fn strategy_display() {
        assert_eq!(Strategy::LinearIteration.to_string(), "iteration");
        assert_eq!(Strategy::StructuredIteration.to_string(), "xiteration");
        assert_eq!(Strategy::Indexing.to_string(), "indexing");
        assert_eq!(Strategy::LazyAssign.to_string(), "assign");
    }

    #[test]
    fn axpy_strategies_map_to_report_names() {
        let names: Vec<_> = AxpyStrategy::ALL
            .into_iter()
            .map(|strategy| Strategy::from(strategy).to_string())
            .collect();

        assert_eq!(names, vec!["iteration", "xiteration", "indexing"]);
    }

    #[test]
    fn axpy_strategies_agree_on_static_rank() {
        let [linear, structured, indexed] =
            axpy_all_strategies::<Array1<f64>>(&Shape::from_extents([nz!(1000)]));

        assert_eq!(linear, structured);
        assert_eq!(linear, indexed);
    }

    #[test]
    fn axpy_strategies_agree_on_dynamic_rank() {
        let [linear, structured, indexed] =
            axpy_all_strategies::<ArrayD<f64>>(&Shape::from_extents([nz!(1000)]));

        assert_eq!(linear, structured);
        assert_eq!(linear, indexed);
    }

    #[test]
    fn axpy_strategies_agree_on_three_dimensions() {
        let [linear, structured, indexed] =
            axpy_all_strategies::<Array3<f64>>(&Shape::from_extents([nz!(4), nz!(3), nz!(5)]));

        assert_eq!(linear, structured);
        assert_eq!(linear, indexed);
    }

    #[test]
    fn axpy_matches_closed_form() {
        let [linear, ..] = axpy_all_strategies::<Array1<f64>>(&Shape::from_extents([nz!(1000)]));

        for (i, value) in linear.iter().enumerate() {
            let expected = 1.35 + 2.95 * i as f64;
            assert!(
                (value - expected).abs() <= 1e-9 * expected.max(1.0),
                "position {i}: {value} != {expected}"
            );
        }
    }

    #[test]
    fn axpy_indexed_overwrites_previous_result() {
        let shape = Shape::from_extents([nz!(8)]);
        let mut workload = AxpyWorkload::<Array1<f64>>::generate(&shape, 1.0).unwrap();

        workload.iterate_linear();
        let expected = workload.result().flat().to_vec();

        let mut workload = AxpyWorkload::from_arrays(
            workload.a(),
            workload.x().clone(),
            workload.y().clone(),
            Array1::from(vec![f64::NAN; 8]),
        )
        .unwrap();
        workload.iterate_indexed();

        assert_eq!(workload.result().flat(), expected.as_slice());
    }

    #[test]
    fn assign_lazy_matches_eager_evaluation() {
        let shape = Shape::from_extents([nz!(4), nz!(3), nz!(5)]);
        let mut workload = AssignWorkload::<Array3<f64>>::generate(&shape).unwrap();

        workload.assign_lazy();

        let eager = workload.x() * 3.0 - &(workload.y() * 2.0) * workload.z();
        assert_eq!(workload.result(), &eager);
    }

    #[test]
    fn assign_lazy_agrees_across_variants() {
        let shape = Shape::from_extents([nz!(4), nz!(3), nz!(5)]);

        let mut dynamic = AssignWorkload::<ArrayD<f64>>::generate(&shape).unwrap();
        let mut fixed = AssignWorkload::<Array3<f64>>::generate(&shape).unwrap();

        dynamic.assign_lazy();
        fixed.assign_lazy();

        assert_eq!(dynamic.result().flat(), fixed.result().flat());
    }
}
