use tracing::debug;

use crate::shape::IndexCursor;
use crate::{
    Container, Error, Result, Shape, Variant, assign_lazy, axpy_indexed, axpy_linear,
    axpy_structured,
};

/// Per-axis coefficients of the fill formulas of the expression workload inputs.
const ASSIGN_X_COEFFICIENTS: [f64; 3] = [0.25, 0.5, -0.01];
const ASSIGN_Y_COEFFICIENTS: [f64; 3] = [0.31, -0.2, 0.07];
const ASSIGN_Z_COEFFICIENTS: [f64; 3] = [0.27, 0.4, -0.03];

/// The arrays and scalar of the `res = a * x + y` computation.
///
/// Each element is filled from its row-major position `p`: `x = 0.5 + p` and `y = 0.25 * p`.
/// For a one-dimensional shape the position is simply the index.
///
/// # Examples
///
/// ```
/// use ndarray::Array1;
/// use new_zealand::nz;
/// use rank_bench::{AxpyWorkload, Container, Shape};
///
/// let shape = Shape::from_extents([nz!(4)]);
/// let mut workload = AxpyWorkload::<Array1<f64>>::generate(&shape, 2.0)?;
///
/// workload.iterate_linear();
///
/// assert_eq!(workload.result().flat(), &[1.0, 3.25, 5.5, 7.75]);
/// # Ok::<(), rank_bench::Error>(())
/// ```
#[derive(Debug)]
pub struct AxpyWorkload<C> {
    a: f64,
    x: C,
    y: C,
    res: C,
}

impl<C: Container> AxpyWorkload<C> {
    /// Allocates the arrays with `shape` and fills the inputs deterministically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkload`] if the container has a fixed rank that differs
    /// from the rank of `shape`.
    pub fn generate(shape: &Shape, a: f64) -> Result<Self> {
        let mut x = C::with_shape(shape)?;
        let mut y = C::with_shape(shape)?;
        let res = C::with_shape(shape)?;

        let mut cursor = IndexCursor::new(shape.dims());

        for position in 0..shape.element_count() {
            let position_value = position as f64;
            let index = cursor.index();

            *x.at_mut(index) = 0.5 + position_value;
            *y.at_mut(index) = 0.25 * position_value;

            cursor.advance();
        }

        debug!(variant = %C::VARIANT, %shape, a, "generated AXPY workload");

        Ok(Self { a, x, y, res })
    }

    /// Assembles a workload from existing arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkload`] if the arrays do not all have the same shape, or if any
    /// of them is not contiguous in row-major order.
    pub fn from_arrays(a: f64, x: C, y: C, res: C) -> Result<Self> {
        ensure_compatible(&[("x", &x), ("y", &y), ("res", &res)])?;

        Ok(Self { a, x, y, res })
    }

    /// The rank variant of the arrays.
    #[must_use]
    pub fn variant(&self) -> Variant {
        C::VARIANT
    }

    /// The scalar coefficient.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// The first input.
    #[must_use]
    pub fn x(&self) -> &C {
        &self.x
    }

    /// The second input.
    #[must_use]
    pub fn y(&self) -> &C {
        &self.y
    }

    /// The result of the most recent computation, zeros if nothing has been computed yet.
    #[must_use]
    pub fn result(&self) -> &C {
        &self.res
    }

    /// Computes the result with lock-step flat iterators.
    pub fn iterate_linear(&mut self) {
        axpy_linear(self.a, &self.x, &self.y, &mut self.res);
    }

    /// Computes the result with lock-step structure-aware iterators.
    pub fn iterate_structured(&mut self) {
        axpy_structured(self.a, &self.x, &self.y, &mut self.res);
    }

    /// Computes the result through per-element multi-index accessor calls.
    pub fn iterate_indexed(&mut self) {
        axpy_indexed(self.a, &self.x, &self.y, &mut self.res);
    }
}

/// The arrays of the `res = 3 * x - 2 * y * z` computation.
///
/// Each input element is a linear function of its `(i, j, k)` multi-index:
///
/// * `x = 0.25 i + 0.5 j - 0.01 k`
/// * `y = 0.31 i - 0.2 j + 0.07 k`
/// * `z = 0.27 i + 0.4 j - 0.03 k`
#[derive(Debug)]
pub struct AssignWorkload<C> {
    x: C,
    y: C,
    z: C,
    res: C,
}

impl<C: Container> AssignWorkload<C> {
    /// Allocates the arrays with `shape` and fills the inputs deterministically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkload`] if `shape` is not of rank 3, or if the container has
    /// a fixed rank other than 3.
    pub fn generate(shape: &Shape) -> Result<Self> {
        if shape.rank() != ASSIGN_X_COEFFICIENTS.len() {
            return Err(Error::InvalidWorkload {
                problem: format!(
                    "the expression workload is defined over rank-3 shapes, not {shape}"
                ),
            });
        }

        let mut x = C::with_shape(shape)?;
        let mut y = C::with_shape(shape)?;
        let mut z = C::with_shape(shape)?;
        let res = C::with_shape(shape)?;

        let mut cursor = IndexCursor::new(shape.dims());

        for _ in 0..shape.element_count() {
            let index = cursor.index();

            *x.at_mut(index) = linear_fill(&ASSIGN_X_COEFFICIENTS, index);
            *y.at_mut(index) = linear_fill(&ASSIGN_Y_COEFFICIENTS, index);
            *z.at_mut(index) = linear_fill(&ASSIGN_Z_COEFFICIENTS, index);

            cursor.advance();
        }

        debug!(variant = %C::VARIANT, %shape, "generated expression workload");

        Ok(Self { x, y, z, res })
    }

    /// Assembles a workload from existing arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkload`] if the arrays do not all have the same shape, or if any
    /// of them is not contiguous in row-major order.
    pub fn from_arrays(x: C, y: C, z: C, res: C) -> Result<Self> {
        ensure_compatible(&[("x", &x), ("y", &y), ("z", &z), ("res", &res)])?;

        Ok(Self { x, y, z, res })
    }

    /// The rank variant of the arrays.
    #[must_use]
    pub fn variant(&self) -> Variant {
        C::VARIANT
    }

    /// The first input.
    #[must_use]
    pub fn x(&self) -> &C {
        &self.x
    }

    /// The second input.
    #[must_use]
    pub fn y(&self) -> &C {
        &self.y
    }

    /// The third input.
    #[must_use]
    pub fn z(&self) -> &C {
        &self.z
    }

    /// The result of the most recent computation, zeros if nothing has been computed yet.
    #[must_use]
    pub fn result(&self) -> &C {
        &self.res
    }

    /// Computes the result by assigning a lazily evaluated expression.
    pub fn assign_lazy(&mut self) {
        assign_lazy(&self.x, &self.y, &self.z, &mut self.res);
    }
}

fn linear_fill(coefficients: &[f64], index: &[usize]) -> f64 {
    coefficients
        .iter()
        .zip(index)
        .map(|(coefficient, &i)| coefficient * i as f64)
        .sum()
}

fn ensure_compatible<C: Container>(arrays: &[(&str, &C)]) -> Result<()> {
    // The flat strategies pair elements by storage position.
    if let Some((name, array)) = arrays.iter().find(|(_, array)| !array.is_standard_layout()) {
        return Err(Error::InvalidWorkload {
            problem: format!(
                "`{name}` with shape {:?} is not contiguous in row-major order",
                array.dims()
            ),
        });
    }

    let Some(((first_name, first), rest)) = arrays.split_first() else {
        return Ok(());
    };

    for (name, array) in rest {
        if array.dims() != first.dims() {
            return Err(Error::InvalidWorkload {
                problem: format!(
                    "`{name}` has shape {:?} but `{first_name}` has shape {:?}",
                    array.dims(),
                    first.dims()
                ),
            });
        }
    }

    Ok(())
}
