use std::fmt;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::TOLERANCE;
use crate::error::QubitError;

/// Amplitudes of a (multi-)qubit system in the computational basis.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
	amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
	/// Wraps raw amplitudes. No normalization is applied or checked.
	pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
		Self { amplitudes }
	}

	/// Basis state `|index>` of a `dim`-dimensional system.
	pub fn basis(dim: usize, index: usize) -> Self {
		let mut amplitudes = vec![Complex::zero(); dim];
		if let Some(amplitude) = amplitudes.get_mut(index) {
			*amplitude = Complex::one();
		}
		Self { amplitudes }
	}

	/// `|0>`
	pub fn zero() -> Self {
		Self::basis(2, 0)
	}

	/// `|1>`
	pub fn one() -> Self {
		Self::basis(2, 1)
	}

	/// Amplitudes in basis order.
	pub fn amplitudes(&self) -> &[Complex<f64>] {
		&self.amplitudes
	}

	/// Number of amplitudes.
	pub fn dim(&self) -> usize {
		self.amplitudes.len()
	}

	/// Sum of squared magnitudes.
	pub fn norm_sqr(&self) -> f64 {
		self.amplitudes.iter().map(Complex::norm_sqr).sum()
	}

	/// Returns `true` if the squared norm is 1 within `TOLERANCE`.
	pub fn is_normalized(&self) -> bool {
		(self.norm_sqr() - 1.0).abs() < TOLERANCE
	}

	/// Kronecker product `self ⊗ other`.
	pub fn kron(&self, other: &Self) -> Self {
		let amplitudes = self
			.amplitudes
			.iter()
			.flat_map(|a| other.amplitudes.iter().map(move |b| a * b))
			.collect();
		Self { amplitudes }
	}

	/// Element-wise comparison within `TOLERANCE`.
	pub fn approx_eq(&self, other: &Self) -> bool {
		self.dim() == other.dim()
			&& self
				.amplitudes
				.iter()
				.zip(&other.amplitudes)
				.all(|(a, b)| (a - b).norm() < TOLERANCE)
	}
}

impl fmt::Display for StateVector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[")?;
		for (i, c) in self.amplitudes.iter().enumerate() {
			write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
		}
		write!(f, "]")
	}
}

/// `alpha|0> + beta|1>` is a valid qubit when `|alpha|² + |beta|² = 1`.
pub fn is_valid_qubit(alpha: Complex<f64>, beta: Complex<f64>) -> bool {
	StateVector::new(vec![alpha, beta]).is_normalized()
}

/// Tensor product of one or more states, left to right.
///
/// # Errors
/// Returns `QubitError::EmptyProduct` when `states` is empty.
pub fn tensor_product(states: &[StateVector]) -> Result<StateVector, QubitError> {
	let (first, rest) = states.split_first().ok_or(QubitError::EmptyProduct)?;
	Ok(rest.iter().fold(first.clone(), |acc, state| acc.kron(state)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::f64::consts::FRAC_1_SQRT_2;

	#[test]
	fn test_valid_qubit() {
		assert!(is_valid_qubit(Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)));
		assert!(is_valid_qubit(Complex::one(), Complex::zero()));
		assert!(!is_valid_qubit(Complex::one(), Complex::one()));
	}

	#[test]
	fn test_zero_tensor_one() {
		let product = tensor_product(&[StateVector::zero(), StateVector::one()]).unwrap();
		assert!(product.approx_eq(&StateVector::basis(4, 1)));
	}

	#[test]
	fn test_three_qubit_product_dimension() {
		let product = tensor_product(&[StateVector::one(), StateVector::one(), StateVector::zero()]).unwrap();
		assert_eq!(product.dim(), 8);
		assert!(product.approx_eq(&StateVector::basis(8, 6)));
	}

	#[test]
	fn test_empty_product() {
		assert_eq!(tensor_product(&[]), Err(QubitError::EmptyProduct));
	}

	#[test]
	fn test_display() {
		assert_eq!(StateVector::zero().to_string(), "[1.0000+0.0000i, 0.0000+0.0000i]");
	}
}
