use derive_more::Display;
use ndarray::iter::{Iter, IterMut};
use ndarray::{Array, Dimension};

use crate::expr::{self, Expr, Lazy, Operand};
use crate::{Error, Result, Shape};

/// How the rank of a container is determined.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Variant {
    /// The rank is decided when the array is constructed.
    #[display("dynamic")]
    RankDynamic,

    /// The rank is part of the array type.
    #[display("static")]
    RankStatic,
}

impl Variant {
    /// Both variants, in report order.
    pub const ALL: [Self; 2] = [Self::RankDynamic, Self::RankStatic];
}

/// The array capabilities that the benchmark strategies are written against.
///
/// Implemented for every `ndarray::Array<f64, D>`: with `D = IxDyn` the container is
/// rank-dynamic, with a fixed dimension type such as `Ix1` or `Ix3` it is rank-static.
/// Strategies are generic over this trait and get monomorphized per variant.
///
/// Arrays created through [`with_shape()`][Self::with_shape] are contiguous in standard
/// (row-major) layout, so flat storage order and structured iteration order coincide. Arrays
/// from other sources are only usable by the strategies if
/// [`is_standard_layout()`][Self::is_standard_layout] holds.
pub trait Container: Sized {
    /// The `ndarray` dimension type of the container.
    type Dim: Dimension;

    /// Whether the rank is decided at runtime or fixed in the type.
    const VARIANT: Variant;

    /// Creates a zero-filled array reshaped to `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkload`] if the container has a fixed rank that differs
    /// from the rank of `shape`.
    fn with_shape(shape: &Shape) -> Result<Self>;

    /// The dimension lengths of the array.
    fn dims(&self) -> &[usize];

    /// Reads the element at a multi-index.
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong rank or is out of bounds.
    fn at(&self, index: &[usize]) -> f64;

    /// Returns a mutable reference to the element at a multi-index.
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong rank or is out of bounds.
    fn at_mut(&mut self, index: &[usize]) -> &mut f64;

    /// Whether the elements are contiguous in row-major order, so that storage order and
    /// logical order are the same.
    fn is_standard_layout(&self) -> bool;

    /// The elements in storage order, ignoring the multi-dimensional structure.
    ///
    /// # Panics
    ///
    /// Panics if the array is not contiguous.
    fn flat(&self) -> &[f64];

    /// The elements in storage order, ignoring the multi-dimensional structure.
    fn flat_mut(&mut self) -> &mut [f64];

    /// Iterates over the elements with the shape and stride aware iterator of the array.
    fn structured(&self) -> Iter<'_, f64, Self::Dim>;

    /// Iterates over the elements with the shape and stride aware iterator of the array.
    fn structured_mut(&mut self) -> IterMut<'_, f64, Self::Dim>;

    /// Uses the array as the leaf of a lazily evaluated expression.
    fn lazy(&self) -> Lazy<Operand<'_>> {
        expr::lazy(self.flat())
    }

    /// Evaluates `expr` at every storage position and stores the results in this array.
    ///
    /// # Panics
    ///
    /// Panics if any array read by the expression has fewer elements than this one.
    fn assign_expr<E: Expr>(&mut self, expr: &Lazy<E>) {
        for (position, slot) in self.flat_mut().iter_mut().enumerate() {
            *slot = expr.eval(position);
        }
    }
}

impl<D: Dimension> Container for Array<f64, D> {
    type Dim = D;

    const VARIANT: Variant = if D::NDIM.is_some() {
        Variant::RankStatic
    } else {
        Variant::RankDynamic
    };

    fn with_shape(shape: &Shape) -> Result<Self> {
        match D::NDIM {
            Some(rank) if rank != shape.rank() => Err(Error::InvalidWorkload {
                problem: format!(
                    "a rank-{rank} array cannot take the rank-{} shape {shape}",
                    shape.rank()
                ),
            }),
            _ => Ok(Self::zeros(to_dimension::<D>(shape.dims()))),
        }
    }

    fn dims(&self) -> &[usize] {
        self.shape()
    }

    #[inline]
    fn at(&self, index: &[usize]) -> f64 {
        self[to_dimension::<D>(index)]
    }

    #[inline]
    fn at_mut(&mut self, index: &[usize]) -> &mut f64 {
        &mut self[to_dimension::<D>(index)]
    }

    fn is_standard_layout(&self) -> bool {
        self.as_slice().is_some()
    }

    fn flat(&self) -> &[f64] {
        self.as_slice_memory_order()
            .expect("workload arrays are always allocated contiguously")
    }

    fn flat_mut(&mut self) -> &mut [f64] {
        self.as_slice_memory_order_mut()
            .expect("workload arrays are always allocated contiguously")
    }

    fn structured(&self) -> Iter<'_, f64, D> {
        self.iter()
    }

    fn structured_mut(&mut self) -> IterMut<'_, f64, D> {
        self.iter_mut()
    }
}

/// Converts a multi-index or a list of dimension lengths into an `ndarray` dimension value.
///
/// For fixed-rank dimension types this panics if the slice has a different length.
#[inline]
fn to_dimension<D: Dimension>(values: &[usize]) -> D {
    let mut dim = D::zeros(values.len());
    dim.slice_mut().copy_from_slice(values);
    dim
}
