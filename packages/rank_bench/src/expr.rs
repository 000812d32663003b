//! Lazily evaluated elementwise expressions.
//!
//! Arithmetic on [`Lazy`] values does not compute anything. It builds an expression tree whose
//! type records the whole computation, and the tree is evaluated one storage position at a time
//! when it is assigned into an array via [`Container::assign_expr()`][crate::Container::assign_expr].
//! No sub-expression is ever materialized as a full-size array.
//!
//! ```
//! use ndarray::Array1;
//! use rank_bench::Container;
//!
//! let x = Array1::from(vec![1.0, 2.0, 3.0]);
//! let y = Array1::from(vec![0.5, 0.5, 0.5]);
//! let mut res = Array1::<f64>::zeros(3);
//!
//! let expr = 3.0 * x.lazy() - 2.0 * y.lazy() * x.lazy();
//! res.assign_expr(&expr);
//!
//! assert_eq!(res.to_vec(), vec![2.0, 4.0, 6.0]);
//! ```

use std::marker::PhantomData;
use std::ops::{Add, Mul, Sub};

/// An elementwise expression that can be evaluated at any position in storage order.
pub trait Expr {
    /// Evaluates the expression at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the storage of any array the expression reads.
    fn eval(&self, position: usize) -> f64;
}

/// Wraps the storage of an array as the leaf of an expression.
#[must_use]
pub fn lazy(values: &[f64]) -> Lazy<Operand<'_>> {
    Lazy(Operand { values })
}

/// Reads the elements of an array.
#[derive(Clone, Copy, Debug)]
pub struct Operand<'a> {
    values: &'a [f64],
}

impl Expr for Operand<'_> {
    #[inline]
    fn eval(&self, position: usize) -> f64 {
        self.values[position]
    }
}

/// A scalar broadcast to every position.
#[derive(Clone, Copy, Debug)]
pub struct Scalar(f64);

impl Expr for Scalar {
    #[inline]
    fn eval(&self, _position: usize) -> f64 {
        self.0
    }
}

/// An elementwise operation that combines two values.
pub trait BinaryOp {
    /// Combines the values of the two operands at one position.
    fn apply(lhs: f64, rhs: f64) -> f64;
}

/// Elementwise addition.
#[derive(Clone, Copy, Debug)]
pub struct Plus;

impl BinaryOp for Plus {
    #[inline]
    fn apply(lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }
}

/// Elementwise subtraction.
#[derive(Clone, Copy, Debug)]
pub struct Minus;

impl BinaryOp for Minus {
    #[inline]
    fn apply(lhs: f64, rhs: f64) -> f64 {
        lhs - rhs
    }
}

/// Elementwise multiplication.
#[derive(Clone, Copy, Debug)]
pub struct Times;

impl BinaryOp for Times {
    #[inline]
    fn apply(lhs: f64, rhs: f64) -> f64 {
        lhs * rhs
    }
}

/// Combines two sub-expressions with a [`BinaryOp`].
#[derive(Clone, Copy, Debug)]
pub struct Binary<Op, L, R> {
    lhs: L,
    rhs: R,
    _op: PhantomData<Op>,
}

impl<Op, L, R> Binary<Op, L, R> {
    fn new(lhs: L, rhs: R) -> Self {
        Self {
            lhs,
            rhs,
            _op: PhantomData,
        }
    }
}

impl<Op: BinaryOp, L: Expr, R: Expr> Expr for Binary<Op, L, R> {
    #[inline]
    fn eval(&self, position: usize) -> f64 {
        Op::apply(self.lhs.eval(position), self.rhs.eval(position))
    }
}

/// An expression that composes with other lazy expressions and with `f64` scalars through the
/// `+`, `-` and `*` operators.
#[derive(Clone, Copy, Debug)]
pub struct Lazy<E>(E);

impl<E: Expr> Expr for Lazy<E> {
    #[inline]
    fn eval(&self, position: usize) -> f64 {
        self.0.eval(position)
    }
}

macro_rules! lazy_operator {
    ($operator:ident, $method:ident, $op:ty) => {
        impl<L: Expr, R: Expr> $operator<Lazy<R>> for Lazy<L> {
            type Output = Lazy<Binary<$op, L, R>>;

            fn $method(self, rhs: Lazy<R>) -> Self::Output {
                Lazy(Binary::new(self.0, rhs.0))
            }
        }

        impl<L: Expr> $operator<f64> for Lazy<L> {
            type Output = Lazy<Binary<$op, L, Scalar>>;

            fn $method(self, rhs: f64) -> Self::Output {
                Lazy(Binary::new(self.0, Scalar(rhs)))
            }
        }

        impl<R: Expr> $operator<Lazy<R>> for f64 {
            type Output = Lazy<Binary<$op, Scalar, R>>;

            fn $method(self, rhs: Lazy<R>) -> Self::Output {
                Lazy(Binary::new(Scalar(self), rhs.0))
            }
        }
    };
}

lazy_operator!(Add, add, Plus);
lazy_operator!(Sub, sub, Minus);
lazy_operator!(Mul, mul, Times);
