use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::TOLERANCE;
use crate::error::QubitError;
use crate::state::StateVector;

/// Square complex matrix, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
	dim: usize,
	data: Vec<Complex<f64>>,
}

impl Matrix {
	/// Builds a matrix from row-major data.
	///
	/// # Errors
	/// Returns an error if the number of elements is not a perfect square.
	pub fn from_rows(data: Vec<Complex<f64>>) -> Result<Self, QubitError> {
		let dim = (data.len() as f64).sqrt().round() as usize;
		if dim * dim != data.len() {
			return Err(QubitError::NotSquare(data.len()));
		}
		Ok(Self { dim, data })
	}

	/// Real-valued convenience constructor.
	pub fn from_real_rows(data: &[f64]) -> Result<Self, QubitError> {
		Self::from_rows(data.iter().map(|x| Complex::new(*x, 0.0)).collect())
	}

	/// `dim` x `dim` identity matrix.
	pub fn identity(dim: usize) -> Self {
		let mut data = vec![Complex::zero(); dim * dim];
		for i in 0..dim {
			data[i * dim + i] = Complex::one();
		}
		Self { dim, data }
	}

	/// Hadamard gate `1/√2 [[1, 1], [1, -1]]`.
	pub fn hadamard() -> Self {
		let h = Complex::new(FRAC_1_SQRT_2, 0.0);
		Self { dim: 2, data: vec![h, h, h, -h] }
	}

	/// Pauli-X (NOT) gate.
	pub fn pauli_x() -> Self {
		Self { dim: 2, data: vec![Complex::zero(), Complex::one(), Complex::one(), Complex::zero()] }
	}

	/// Pauli-Z (phase flip) gate.
	pub fn pauli_z() -> Self {
		Self { dim: 2, data: vec![Complex::one(), Complex::zero(), Complex::zero(), -Complex::<f64>::one()] }
	}

	/// Number of rows (and columns).
	pub fn dim(&self) -> usize {
		self.dim
	}

	/// Entry at (`row`, `col`).
	///
	/// # Panics
	/// Panics if `row` or `col` is not below `dim()`.
	pub(crate) fn get(&self, row: usize, col: usize) -> Complex<f64> {
		self.data[row * self.dim + col]
	}

	/// Conjugate transpose.
	pub fn adjoint(&self) -> Self {
		let mut data = Vec::with_capacity(self.data.len());
		for row in 0..self.dim {
			for col in 0..self.dim {
				data.push(self.get(col, row).conj());
			}
		}
		Self { dim: self.dim, data }
	}

	/// Matrix product `self · other`.
	///
	/// # Errors
	/// Returns an error if the dimensions differ.
	pub fn matmul(&self, other: &Self) -> Result<Self, QubitError> {
		if self.dim != other.dim {
			return Err(QubitError::DimensionMismatch { expected: self.dim, found: other.dim });
		}
		let n = self.dim;
		let mut data = vec![Complex::zero(); n * n];
		for row in 0..n {
			for col in 0..n {
				data[row * n + col] = (0..n).map(|k| self.get(row, k) * other.get(k, col)).sum::<Complex<f64>>();
			}
		}
		Ok(Self { dim: n, data })
	}

	/// Element-wise comparison within `TOLERANCE`.
	pub fn approx_eq(&self, other: &Self) -> bool {
		self.dim == other.dim
			&& self.data.iter().zip(&other.data).all(|(a, b)| (a - b).norm() < TOLERANCE)
	}

	/// `U · U† = I`
	pub fn is_unitary(&self) -> bool {
		match self.matmul(&self.adjoint()) {
			Ok(product) => product.approx_eq(&Self::identity(self.dim)),
			Err(_) => false,
		}
	}
}

/// Applies `matrix` to `state` (matrix-vector product).
///
/// # Errors
/// Returns an error if the matrix and state dimensions differ.
pub fn apply_unitary(matrix: &Matrix, state: &StateVector) -> Result<StateVector, QubitError> {
	if matrix.dim() != state.dim() {
		return Err(QubitError::DimensionMismatch { expected: matrix.dim(), found: state.dim() });
	}
	let amplitudes = (0..matrix.dim())
		.map(|row| {
			state
				.amplitudes()
				.iter()
				.enumerate()
				.map(|(col, amplitude)| matrix.get(row, col) * amplitude)
				.sum::<Complex<f64>>()
		})
		.collect();
	Ok(StateVector::new(amplitudes))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_standard_gates_are_unitary() {
		assert!(Matrix::hadamard().is_unitary());
		assert!(Matrix::pauli_x().is_unitary());
		assert!(Matrix::pauli_z().is_unitary());
		assert!(Matrix::identity(4).is_unitary());
	}

	#[test]
	fn test_non_unitary() {
		let m = Matrix::from_real_rows(&[1.0, 1.0, 0.0, 1.0]).unwrap();
		assert!(!m.is_unitary());
	}

	#[test]
	fn test_not_square() {
		assert_eq!(Matrix::from_real_rows(&[1.0, 2.0, 3.0]), Err(QubitError::NotSquare(3)));
	}

	#[test]
	fn test_hadamard_on_zero() {
		let result = apply_unitary(&Matrix::hadamard(), &StateVector::zero()).unwrap();
		let expected = StateVector::new(vec![Complex::new(FRAC_1_SQRT_2, 0.0); 2]);
		assert!(result.approx_eq(&expected));
		assert!(result.is_normalized());
	}

	#[test]
	fn test_hadamard_is_self_inverse() {
		let h = Matrix::hadamard();
		assert!(h.matmul(&h).unwrap().approx_eq(&Matrix::identity(2)));
	}

	#[test]
	fn test_apply_dimension_mismatch() {
		let result = apply_unitary(&Matrix::identity(4), &StateVector::zero());
		assert_eq!(result, Err(QubitError::DimensionMismatch { expected: 4, found: 2 }));
	}

	#[test]
	fn test_adjoint_conjugates() {
		let m = Matrix::from_rows(vec![
			Complex::new(0.0, 1.0),
			Complex::new(2.0, 0.0),
			Complex::new(3.0, 0.0),
			Complex::new(0.0, -4.0),
		])
		.unwrap();
		let adjoint = m.adjoint();
		assert_eq!(adjoint.get(0, 0), Complex::new(0.0, -1.0));
		assert_eq!(adjoint.get(0, 1), Complex::new(3.0, 0.0));
		assert_eq!(adjoint.get(1, 1), Complex::new(0.0, 4.0));
	}
}
