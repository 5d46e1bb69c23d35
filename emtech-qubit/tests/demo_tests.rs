// tests/demo_tests.rs

use emtech_qubit::{Matrix, QubitError, StateVector, apply_unitary, is_valid_qubit, tensor_product};
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

#[test]
fn test_coursework_walkthrough() -> Result<(), QubitError> {
    // (1/√2)|0> + (i/√2)|1>
    let alpha = Complex::new(FRAC_1_SQRT_2, 0.0);
    let beta = Complex::new(0.0, FRAC_1_SQRT_2);
    assert!(is_valid_qubit(alpha, beta), "equal superposition should be normalized");

    let product = tensor_product(&[StateVector::zero(), StateVector::one()])?;
    assert!(product.approx_eq(&StateVector::basis(4, 1)), "|0>⊗|1> should be |01>");

    let h = Matrix::hadamard();
    assert!(h.is_unitary(), "Hadamard should be unitary");

    let plus = apply_unitary(&h, &StateVector::zero())?;
    let back = apply_unitary(&h, &plus)?;
    assert!(back.approx_eq(&StateVector::zero()), "H·H|0> should return |0>");
    Ok(())
}

#[test]
fn test_gate_on_two_qubit_system() -> Result<(), QubitError> {
    // X on a 2-qubit system needs a 4x4 gate: X ⊗ I built from basis images.
    let x = Matrix::pauli_x();
    let state = tensor_product(&[StateVector::zero(), StateVector::zero()])?;
    let err = apply_unitary(&x, &state).unwrap_err();
    assert_eq!(err, QubitError::DimensionMismatch { expected: 2, found: 4 });

    let x_i = Matrix::from_real_rows(&[
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
    ])?;
    assert!(x_i.is_unitary());
    let flipped = apply_unitary(&x_i, &state)?;
    assert!(flipped.approx_eq(&StateVector::basis(4, 2)));
    Ok(())
}
