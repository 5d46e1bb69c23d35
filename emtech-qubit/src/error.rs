use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QubitError {
	/// A tensor product needs at least one factor.
	#[error("tensor product of an empty list of states")]
	EmptyProduct,

	/// Matrix and vector (or two matrices) have incompatible sizes.
	#[error("dimension mismatch: expected {expected}, got {found}")]
	DimensionMismatch { expected: usize, found: usize },

	/// Row-major data does not fill a square matrix.
	#[error("{0} elements do not form a square matrix")]
	NotSquare(usize),
}
