use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::granularity::Granularity;
use super::state::State;
use crate::error::{NgramError, Result};
use crate::io::write_atomic;

/// Frequency table of an n-gram model.
///
/// The `FrequencyTable` stores one state per context of length `n-1`
/// and the number of times each next symbol followed that context.
///
/// # Responsibilities
/// - Build the table from a corpus in a single sliding-window pass
/// - Build the same table from worker threads (`build_parallel`)
/// - Answer count queries for generation and export
/// - Merge with another table of the same order and granularity
/// - Persist to / restore from a binary file
///
/// # Invariants
/// - `n` is always >= 2
/// - Each state in `states` corresponds to a unique context of `n-1` symbols
/// - All state transitions have occurrence counts >= 1
/// - The table is never mutated once handed to a `Generator`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// The order of the model (number of symbols in the n-gram)
	n: usize,

	/// How the corpus was split into symbols
	granularity: Granularity,

	/// Mapping from a context key to its corresponding state
	states: BTreeMap<String, State>,
}

impl FrequencyTable {
	/// Creates a new empty table of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn new(n: usize, granularity: Granularity) -> Result<Self> {
		if n < 2 {
			return Err(NgramError::InvalidOrder(n));
		}
		Ok(Self { n, granularity, states: BTreeMap::new() })
	}

	/// Builds a table from a corpus in one pass.
	///
	/// A corpus shorter than `n` symbols yields an empty table; this is
	/// logged as a warning because such a table cannot drive generation.
	pub fn build(corpus: &str, n: usize, granularity: Granularity) -> Result<Self> {
		let mut table = Self::new(n, granularity)?;
		let symbols = granularity.split(corpus);
		table.add_symbols(&symbols);
		table.report();
		Ok(table)
	}

	/// Builds a table by splitting the corpus into chunks, counting each chunk
	/// on its own thread and merging the partial tables.
	///
	/// Consecutive chunks overlap by `n - 1` symbols so every window of the
	/// corpus is counted exactly once; the result equals `build`.
	///
	/// # Notes
	/// - Uses MPSC channels to collect partial tables from threads.
	/// - The number of chunks is derived from the number of CPUs.
	pub fn build_parallel(corpus: &str, n: usize, granularity: Granularity) -> Result<Self> {
		let mut final_table = Self::new(n, granularity)?;
		let symbols = granularity.split(corpus);
		if symbols.len() < n {
			final_table.report();
			return Ok(final_table);
		}

		let windows = symbols.len() - n + 1;
		let chunks = num_cpus::get().max(1);
		let chunk_size = windows.div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		for start in (0..windows).step_by(chunk_size) {
			let tx = tx.clone();
			let end = (start + chunk_size).min(windows);
			let chunk: Vec<String> = symbols[start..end + n - 1].to_vec();

			thread::spawn(move || {
				let mut partial_table = Self { n, granularity, states: BTreeMap::new() };
				partial_table.add_symbols(&chunk);
				// The receiver outlives every sender, a failed send cannot happen.
				let _ = tx.send(partial_table);
			});
		}
		drop(tx);

		for partial_table in rx.iter() {
			final_table.merge(&partial_table)?;
		}

		final_table.report();
		Ok(final_table)
	}

	/// Slides a window of `n` symbols across `symbols` and counts each
	/// `(context, next)` pair. Inputs shorter than `n` are ignored.
	fn add_symbols(&mut self, symbols: &[String]) {
		if symbols.len() < self.n {
			return;
		}

		for window in symbols.windows(self.n) {
			let (context, next) = window.split_at(self.n - 1);
			let key = self.granularity.join(context);
			let state = self.states.entry(key.clone()).or_insert_with(|| State::new(&key));
			state.add_transition(&next[0]);
		}
	}

	fn report(&self) {
		if self.states.is_empty() {
			warn!("no n-grams observed in corpus (n = {})", self.n);
		} else {
			info!(
				"frequency table built: n = {}, {} contexts, {} n-grams",
				self.n,
				self.states.len(),
				self.states.values().map(State::total).sum::<usize>()
			);
		}
	}

	/// Returns the order `n` of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Returns how the corpus was split into symbols.
	pub fn granularity(&self) -> Granularity {
		self.granularity
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if no context was observed.
	///
	/// # Notes
	/// - A non-empty table can still be unusable for generation if none of
	///   its states has a transition, see `has_transitions`.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Returns `true` if at least one context has an observed continuation.
	pub fn has_transitions(&self) -> bool {
		self.states.values().any(|state| state.total() > 0)
	}

	/// Iterates over context keys in ascending order.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.states.keys().map(String::as_str)
	}

	/// Returns the state of a context, if it was observed.
	pub fn state(&self, context: &str) -> Option<&State> {
		self.states.get(context)
	}

	/// Returns the `next symbol -> count` mapping of a context.
	///
	/// # Returns
	/// - `Some(map)` for an observed context (never empty in a valid table)
	/// - `None` if the context was never observed
	pub fn transitions(&self, context: &str) -> Option<&BTreeMap<String, usize>> {
		self.states.get(context).map(State::transitions)
	}

	/// Number of times `context` was followed by any symbol.
	pub fn total_count(&self, context: &str) -> usize {
		self.states.get(context).map_or(0, State::total)
	}

	/// Number of times `context` was followed by `next`.
	pub fn count(&self, context: &str, next: &str) -> usize {
		self.transitions(context)
			.and_then(|t| t.get(next))
			.copied()
			.unwrap_or(0)
	}

	/// Builds the lookup key for a slice of `n-1` symbols.
	pub fn context_key<S: AsRef<str>>(&self, symbols: &[S]) -> String {
		self.granularity.join(symbols)
	}

	/// Returns the context with the highest total count.
	/// Ties are broken by key order (first key wins).
	///
	/// Contexts without any transition are never returned.
	pub fn most_frequent_context(&self) -> Option<&str> {
		let mut best: Option<(&str, usize)> = None;
		for (key, state) in &self.states {
			let total = state.total();
			if total > 0 && best.is_none_or(|(_, count)| total > count) {
				best = Some((key.as_str(), total));
			}
		}
		best.map(|(key, _)| key)
	}

	/// Draws a context with probability proportional to its total count.
	pub fn random_context<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total: usize = self.states.values().map(State::total).sum();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (key, state) in &self.states {
			let weight = state.total();
			if r < weight {
				return Some(key.as_str());
			}
			r -= weight;
		}
		self.states.keys().next_back().map(String::as_str)
	}

	/// Checks the table invariants.
	///
	/// # Errors
	/// Returns `NgramError::InvalidOrder` if `n < 2`, and `NgramError::Corrupt` if:
	/// - a map key differs from the key stored in its state
	/// - a context does not hold exactly `n-1` symbols
	/// - a state has no transition, or a transition has a zero count
	pub fn validate(&self) -> Result<()> {
		if self.n < 2 {
			return Err(NgramError::InvalidOrder(self.n));
		}

		for (key, state) in &self.states {
			if key != state.key() {
				return Err(NgramError::Corrupt(format!("context '{key}' stores state '{}'", state.key())));
			}
			let symbols = self.granularity.split(key);
			if symbols.len() != self.n - 1 || self.granularity.join(&symbols) != *key {
				return Err(NgramError::Corrupt(format!(
					"context '{key}' does not hold {} symbols",
					self.n - 1
				)));
			}
			if state.transitions().is_empty() {
				return Err(NgramError::Corrupt(format!("context '{key}' has no transition")));
			}
			if let Some((next, _)) = state.transitions().iter().find(|(_, count)| **count == 0) {
				return Err(NgramError::Corrupt(format!("transition '{key}' -> '{next}' has a zero count")));
			}
		}

		Ok(())
	}

	/// Inserts a state as-is, bypassing the builder. Used to model damaged tables.
	#[cfg(test)]
	pub(crate) fn insert_state(&mut self, state: State) {
		self.states.insert(state.key().to_owned(), state);
	}

	/// Merges another table into this one.
	///
	/// # Notes
	/// - Both tables must have the same order `n` and granularity.
	/// - Occurrence counts for matching contexts and transitions are summed.
	///
	/// # Errors
	/// Returns an error if the orders or granularities do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n || self.granularity != other.granularity {
			return Err(NgramError::Mismatch(format!(
				"self=(n={}, {:?}), other=(n={}, {:?})",
				self.n, self.granularity, other.n, other.granularity
			)));
		}

		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state)?;
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		Ok(())
	}

	/// Serializes the table with `postcard` and writes it atomically.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		write_atomic(path, &bytes)?;
		Ok(())
	}

	/// Loads a table previously written by `save`.
	///
	/// # Errors
	/// - I/O and decoding errors are propagated.
	/// - A decoded table that breaks its invariants is rejected (see `validate`),
	///   so a damaged file can never reach a `Generator`.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		let table: Self = postcard::from_bytes(&bytes)?;
		table.validate()?;
		Ok(table)
	}
}
