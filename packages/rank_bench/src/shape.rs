use std::fmt;
use std::num::NonZero;

use smallvec::SmallVec;

use crate::{Error, Result};

/// Dimension lengths or a multi-index. Every shape in this crate has a rank of at most 4,
/// so these never spill to the heap.
pub(crate) type Dims = SmallVec<[usize; 4]>;

/// The dimension lengths of an array: non-empty, with every length at least 1.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use rank_bench::Shape;
///
/// let shape = Shape::from_extents([nz!(4), nz!(3), nz!(5)]);
/// assert_eq!(shape.rank(), 3);
/// assert_eq!(shape.element_count(), 60);
///
/// assert!(Shape::new(&[4, 0, 5]).is_err());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Shape {
    dims: Dims,
}

impl Shape {
    /// Validates the dimension lengths and creates a shape from them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if `dims` is empty or any length is 0.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidShape {
                shape: dims.to_vec(),
                problem: "a shape must have at least one dimension".to_string(),
            });
        }

        if let Some(axis) = dims.iter().position(|&len| len == 0) {
            return Err(Error::InvalidShape {
                shape: dims.to_vec(),
                problem: format!("dimension {axis} has length 0"),
            });
        }

        Ok(Self {
            dims: SmallVec::from_slice(dims),
        })
    }

    /// Creates a shape from lengths that are known to be valid at compile time.
    #[must_use]
    pub fn from_extents<const N: usize>(extents: [NonZero<usize>; N]) -> Self {
        const { assert!(N > 0, "a shape must have at least one dimension") };

        Self {
            dims: extents.into_iter().map(NonZero::get).collect(),
        }
    }

    /// The dimension lengths, outermost first.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of dimensions.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The total number of elements in an array of this shape.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.dims.iter().product()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;

        for (axis, len) in self.dims.iter().enumerate() {
            if axis > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{len}")?;
        }

        write!(f, ")")
    }
}

/// Walks every multi-index of a shape in row-major order.
///
/// The cursor starts at the all-zeros index. Each `advance()` moves to the next index, with the
/// last axis changing fastest, and wraps back to all-zeros after the final index.
#[derive(Debug)]
pub(crate) struct IndexCursor<'a> {
    dims: &'a [usize],
    index: Dims,
}

impl<'a> IndexCursor<'a> {
    pub(crate) fn new(dims: &'a [usize]) -> Self {
        Self {
            dims,
            index: SmallVec::from_elem(0, dims.len()),
        }
    }

    pub(crate) fn index(&self) -> &[usize] {
        &self.index
    }

    pub(crate) fn advance(&mut self) {
        for (slot, &len) in self.index.iter_mut().zip(self.dims).rev() {
            *slot += 1;

            if *slot < len {
                return;
            }

            *slot = 0;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use new_zealand::nz;

    use super::*;

    #[test]
    fn new_accepts_positive_lengths() {
        let shape = Shape::new(&[4, 3, 5]).unwrap();

        assert_eq!(shape.dims(), &[4, 3, 5]);
        assert_eq!(shape.rank(), 3);
        assert_eq!(shape.element_count(), 60);
    }

    #[test]
    fn new_rejects_empty() {
        let error = Shape::new(&[]).unwrap_err();

        assert!(matches!(error, Error::InvalidShape { .. }));
    }

    #[test]
    fn new_rejects_zero_length_dimension() {
        let error = Shape::new(&[4, 0, 5]).unwrap_err();

        match error {
            Error::InvalidShape { shape, problem } => {
                assert_eq!(shape, vec![4, 0, 5]);
                assert!(problem.contains("dimension 1"));
            }
            other @ Error::InvalidWorkload { .. } => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_extents_matches_new() {
        let from_extents = Shape::from_extents([nz!(1000)]);
        let from_new = Shape::new(&[1000]).unwrap();

        assert_eq!(from_extents, from_new);

        let three_dimensional = Shape::from_extents([nz!(4), nz!(3), nz!(5)]);
        assert_eq!(three_dimensional.dims(), &[4, 3, 5]);
    }

    #[test]
    fn display_lists_lengths() {
        assert_eq!(Shape::from_extents([nz!(1000)]).to_string(), "(1000)");
        assert_eq!(
            Shape::from_extents([nz!(4), nz!(3), nz!(5)]).to_string(),
            "(4, 3, 5)"
        );
    }

    #[test]
    fn cursor_walks_row_major() {
        let dims = [2, 3];
        let mut cursor = IndexCursor::new(&dims);

        let mut visited = Vec::new();
        for _ in 0..6 {
            visited.push(cursor.index().to_vec());
            cursor.advance();
        }

        assert_eq!(
            visited,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn cursor_wraps_after_last_index() {
        let dims = [2, 2, 2];
        let mut cursor = IndexCursor::new(&dims);

        for _ in 0..8 {
            cursor.advance();
        }

        assert_eq!(cursor.index(), &[0, 0, 0]);
    }

    #[test]
    fn cursor_on_single_dimension_counts_positions() {
        let dims = [5];
        let mut cursor = IndexCursor::new(&dims);

        for position in 0..5 {
            assert_eq!(cursor.index(), &[position]);
            cursor.advance();
        }
    }
}
