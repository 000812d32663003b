use thiserror::Error;

/// Errors that can occur when constructing a benchmark workload.
///
/// Once a workload exists, none of the strategies executed against it can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested shape cannot describe a non-empty array.
    #[error("invalid shape {shape:?}: {problem}")]
    InvalidShape {
        /// The dimension lengths that were rejected.
        shape: Vec<usize>,

        /// A human-readable description of the problem.
        problem: String,
    },

    /// The arrays of a workload do not fit together, or do not fit the container variant.
    #[error("invalid workload: {problem}")]
    InvalidWorkload {
        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for workload construction, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
