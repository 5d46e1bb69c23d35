use std::io;

use thiserror::Error;

/// Errors produced while building, persisting or sampling an n-gram model.
///
/// Input problems (missing boilerplate markers, a corpus too short to hold a
/// single n-gram) are not errors: they are logged and the pipeline keeps going.
#[derive(Debug, Error)]
pub enum NgramError {
	/// The model order must be at least 2 (one context symbol + one next symbol).
	#[error("n must be >= 2, got {0}")]
	InvalidOrder(usize),

	/// The frequency table holds no context at all, so there is nothing to
	/// sample from and no context to fall back to.
	#[error("no n-grams observed in corpus")]
	EmptyTable,

	/// The seed does not contain exactly `n - 1` symbols.
	#[error("seed must contain {expected} symbols, got {found}")]
	InvalidSeed { expected: usize, found: usize },

	/// A generation parameter is out of range.
	#[error("invalid generation parameter: {0}")]
	InvalidParameter(String),

	/// Two tables of different order or granularity cannot be merged.
	#[error("cannot merge tables: {0}")]
	Mismatch(String),

	/// A loaded table breaks one of its invariants (empty state, zero count,
	/// wrong context length or mismatched key).
	#[error("corrupt frequency table: {0}")]
	Corrupt(String),

	#[error(transparent)]
	Io(#[from] io::Error),

	/// The persisted table could not be encoded or decoded.
	#[error("table serialization failed: {0}")]
	Serialization(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, NgramError>;
