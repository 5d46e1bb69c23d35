//! Numeric qubit helpers.
//!
//! State vectors and square gate matrices over `Complex<f64>`, with the
//! checks used when modelling single and multi-qubit systems:
//! - qubit normalization (`is_valid_qubit`)
//! - Kronecker products of states (`tensor_product`)
//! - unitarity of gates (`Matrix::is_unitary`)
//! - applying a gate to a state (`apply_unitary`)

/// Error type of the crate.
pub mod error;

/// Square complex matrices and standard gates.
pub mod gate;

/// State vectors, qubit validation and tensor products.
pub mod state;

pub use error::QubitError;
pub use gate::{Matrix, apply_unitary};
pub use state::{StateVector, is_valid_qubit, tensor_product};

/// Absolute tolerance used by every floating-point comparison of the crate.
pub const TOLERANCE: f64 = 1e-9;
