#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measures what runtime rank flexibility costs an array engine.
//!
//! The same computations are timed on two container variants: a rank-dynamic array
//! (`ndarray::ArrayD`), whose number of dimensions is only known at runtime, and a rank-static
//! array (`ndarray::Array1`, `ndarray::Array3`), whose number of dimensions is part of its type.
//! Both variants are driven through the [`Container`] trait, so every strategy is compiled once
//! per variant with no dynamic dispatch in the measured code.
//!
//! Two benchmark families are measured:
//!
//! * **AXPY** (`res = a * x + y` over 1000 elements) with three traversal strategies:
//!   flat storage-order iteration ([`axpy_linear()`]), structure-aware iteration
//!   ([`axpy_structured()`]) and per-element multi-index access ([`axpy_indexed()`]).
//! * **Lazy expression assignment** (`res = 3 * x - 2 * y * z` over a `(4, 3, 5)` tensor),
//!   evaluated as one fused expression without materializing sub-expressions
//!   ([`assign_lazy()`], see [`expr`]).
//!
//! Workloads are filled from fixed formulas, so every run sees the same inputs. The [`Harness`]
//! runs one untimed warm-up execution and then times a fixed number of repetitions with a
//! monotonic clock.
//!
//! This package is a development tool for comparing raw timings. It makes no attempt at
//! statistical analysis.
//!
//! # Running the standard suite
//!
//! ```no_run
//! use rank_bench::{Harness, Suite};
//!
//! let report = Suite::standard().run(&Harness::new())?;
//! report.print_to_stdout();
//! # Ok::<(), rank_bench::Error>(())
//! ```
//!
//! # Timing a strategy directly
//!
//! ```
//! use ndarray::ArrayD;
//! use new_zealand::nz;
//! use rank_bench::{AxpyWorkload, Harness, Shape};
//!
//! let shape = Shape::from_extents([nz!(1000)]);
//! let mut workload = AxpyWorkload::<ArrayD<f64>>::generate(&shape, 2.7)?;
//!
//! let elapsed = Harness::new().measure(nz!(100), || workload.iterate_structured());
//! println!("100 repetitions took {elapsed:?}");
//! # Ok::<(), rank_bench::Error>(())
//! ```

mod config;
mod container;
mod error;
pub mod expr;
mod harness;
mod pal;
mod report;
mod run;
mod shape;
mod strategy;
mod workload;

pub use config::*;
pub use container::*;
pub use error::Error;
pub(crate) use error::Result;
pub use harness::*;
pub use report::*;
pub use run::*;
pub use shape::Shape;
pub use strategy::*;
pub use workload::*;
