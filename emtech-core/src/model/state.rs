use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::{NgramError, Result};

/// Represents one context of an n-gram frequency table.
///
/// A `State` corresponds to a fixed `n-1` symbol context (`key`) and stores
/// all observed transitions from this context to the next symbol.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences while the table is being built
/// - Draw the next symbol using weighted random sampling
/// - Merge with another state having the same key (parallel building)
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Context key (n-1 symbols, joined according to the table granularity).
	key: String,
	/// Outgoing transitions indexed by the next symbol.
	/// Example: { " " => 42, "Y" => 3 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: BTreeMap::new(),
		}
	}

	/// Context this state describes.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records an occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: &str) {
		*self.transitions.entry(next.to_owned()).or_insert(0) += 1;
	}

	/// Read-only view of the `next symbol -> count` mapping.
	pub fn transitions(&self) -> &BTreeMap<String, usize> {
		&self.transitions
	}

	/// Number of times this context was followed by any symbol.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Draws the next symbol using weighted random sampling.
	///
	/// A single uniform draw in `0..total` is walked down the cumulative
	/// counts, so the probability of a candidate is exactly
	/// `count / total` whatever order the candidates are visited in.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (next, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(next.as_str());
			}
			r -= occurrence;
		}

		// Unreachable while r < total, kept so the signature stays total.
		self.transitions.keys().next_back().map(String::as_str)
	}

	/// Merges another state into this one.
	///
	/// Both states must represent the same context. Counts are summed.
	///
	/// # Errors
	/// Returns an error if the state keys do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key != other.key {
			return Err(NgramError::Mismatch(format!(
				"context '{}' vs '{}'",
				self.key, other.key
			)));
		}

		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0) += *occurrence;
		}

		Ok(())
	}
}
