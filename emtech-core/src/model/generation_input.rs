use crate::error::{NgramError, Result};

/// What the generator does when the current context was never observed.
///
/// # Variants
/// - `RestartSeed`: go back to the original seed context; if the seed itself
///   is unknown, use the most frequent context of the table.
/// - `RandomContext`: jump to a context drawn proportionally to how often it
///   occurs in the corpus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecoveryPolicy {
	#[default]
	RestartSeed,
	RandomContext,
}

/// Input parameters for one generation run.
///
/// # Responsibilities
/// - Carry the seed text and target length
/// - Select the recovery policy for unseen contexts
/// - Optionally fix the RNG seed so a run can be reproduced
///
/// # Invariants
/// - `length` is always >= 1
pub struct GenerationInput {
	/// Starting context, `n-1` symbols once normalized.
	pub seed: String,

	/// Total number of symbols to emit, seed included.
	length: usize,

	/// Policy applied when a context has no entry in the table.
	pub recovery: RecoveryPolicy,

	/// Fixed RNG seed; `None` draws from the thread RNG.
	pub rng_seed: Option<u64>,
}

impl GenerationInput {
	/// Creates an input with the default recovery policy and an unseeded RNG.
	///
	/// # Errors
	/// Returns an error if `length` is 0.
	pub fn new(seed: &str, length: usize) -> Result<Self> {
		let mut input = Self {
			seed: seed.to_owned(),
			length: 1,
			recovery: RecoveryPolicy::default(),
			rng_seed: None,
		};
		input.set_length(length)?;
		Ok(input)
	}

	/// Returns the target length.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Sets the target length.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_length(&mut self, length: usize) -> Result<()> {
		if length == 0 {
			return Err(NgramError::InvalidParameter("length must be >= 1".to_owned()));
		}
		self.length = length;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let input = GenerationInput::new("TH", 100).unwrap();
		assert_eq!(input.length(), 100);
		assert_eq!(input.recovery, RecoveryPolicy::RestartSeed);
		assert!(input.rng_seed.is_none());
	}

	#[test]
	fn test_zero_length_rejected() {
		assert!(GenerationInput::new("TH", 0).is_err());
		let mut input = GenerationInput::new("TH", 5).unwrap();
		assert!(input.set_length(0).is_err());
		assert_eq!(input.length(), 5);
	}
}
