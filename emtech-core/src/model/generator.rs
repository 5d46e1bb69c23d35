use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{NgramError, Result};
use crate::model::frequency_table::FrequencyTable;
use crate::model::generation_input::{GenerationInput, RecoveryPolicy};
use crate::normalizer::normalize_char;

/// Result of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
	/// Generated symbols, seed included.
	pub symbols: Vec<String>,
	/// Symbols joined according to the table granularity.
	pub sequence: String,
	/// Number of times an unseen context forced a recovery.
	pub recoveries: usize,
}

/// Mutable part of a run: current context and accumulated output.
struct GenerationState {
	context: Vec<String>,
	output: Vec<String>,
}

impl GenerationState {
	fn new(seed: Vec<String>, length: usize) -> Self {
		let mut output = Vec::with_capacity(length);
		output.extend(seed.iter().take(length).cloned());
		Self { context: seed, output }
	}

	/// Appends a symbol and slides the context window by one.
	fn push(&mut self, symbol: &str) {
		self.output.push(symbol.to_owned());
		if !self.context.is_empty() {
			self.context.remove(0);
		}
		self.context.push(symbol.to_owned());
	}
}

/// Samples sequences from a frozen frequency table.
///
/// # Responsibilities
/// - Refuse an empty table before any generation starts
/// - Draw each next symbol proportionally to its observed count
/// - Recover from unseen contexts according to the `RecoveryPolicy`
///
/// The table is borrowed immutably, so any number of generators can share it.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
	table: &'a FrequencyTable,
}

impl<'a> Generator<'a> {
	/// Creates a generator over `table`.
	///
	/// # Errors
	/// Returns `NgramError::EmptyTable` if no context has a single observed
	/// continuation: there would be nothing to sample and nothing to recover to.
	pub fn new(table: &'a FrequencyTable) -> Result<Self> {
		if !table.has_transitions() {
			return Err(NgramError::EmptyTable);
		}
		Ok(Self { table })
	}

	/// Generates a sequence, using `input.rng_seed` when set.
	pub fn generate(&self, input: &GenerationInput) -> Result<GenerationReport> {
		match input.rng_seed {
			Some(seed) => self.generate_with(input, &mut StdRng::seed_from_u64(seed)),
			None => self.generate_with(input, &mut rand::rng()),
		}
	}

	/// Generates a sequence of exactly `input.length()` symbols with `rng`.
	///
	/// # Behavior
	/// - The output starts with the normalized seed (truncated if the seed is
	///   longer than the target length).
	/// - At each step the current context is looked up; a known context emits
	///   one weighted-random symbol and the window slides by one.
	/// - An unknown context is replaced according to the recovery policy;
	///   nothing is emitted for that step.
	///
	/// # Errors
	/// Returns an error if the seed does not contain `n-1` symbols.
	pub fn generate_with<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<GenerationReport> {
		let seed = self.seed_symbols(&input.seed)?;
		let length = input.length();
		let mut state = GenerationState::new(seed.clone(), length);
		let mut recoveries = 0;

		while state.output.len() < length {
			let key = self.table.context_key(&state.context);
			let next = self.table.state(&key).and_then(|s| s.sample(rng));
			match next {
				Some(symbol) => state.push(symbol),
				None => {
					state.context = self.recover(&seed, input.recovery, rng)?;
					recoveries += 1;
					debug!(
						"unseen context '{}' at position {}, restarting from '{}'",
						key,
						state.output.len(),
						self.table.context_key(&state.context)
					);
				}
			}
		}

		if recoveries > 0 {
			info!("generation needed {recoveries} context recoveries");
		}

		let sequence = self.table.granularity().join(&state.output);
		Ok(GenerationReport { symbols: state.output, sequence, recoveries })
	}

	/// Normalizes a seed the same way the corpus was and splits it into symbols.
	///
	/// # Errors
	/// Returns an error if the seed does not contain exactly `n-1` symbols.
	pub fn seed_symbols(&self, seed: &str) -> Result<Vec<String>> {
		let normalized: String = seed.chars().map(normalize_char).collect();
		let symbols = self.table.granularity().split(&normalized);
		let expected = self.table.order() - 1;
		if symbols.len() != expected {
			return Err(NgramError::InvalidSeed { expected, found: symbols.len() });
		}
		Ok(symbols)
	}

	/// Picks a context with at least one continuation to resume from.
	fn recover<R: Rng + ?Sized>(&self, seed: &[String], policy: RecoveryPolicy, rng: &mut R) -> Result<Vec<String>> {
		let granularity = self.table.granularity();
		match policy {
			RecoveryPolicy::RestartSeed => {
				let seed_key = self.table.context_key(seed);
				if self.table.total_count(&seed_key) > 0 {
					return Ok(seed.to_vec());
				}
				self.table
					.most_frequent_context()
					.map(|key| granularity.split(key))
					.ok_or(NgramError::EmptyTable)
			}
			RecoveryPolicy::RandomContext => self
				.table
				.random_context(rng)
				.map(|key| granularity.split(key))
				.ok_or(NgramError::EmptyTable),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::granularity::Granularity;
	use crate::model::state::State;

	fn cat_table() -> FrequencyTable {
		FrequencyTable::build("THE CAT SAT ON THE MAT.", 4, Granularity::Chars).unwrap()
	}

	#[test]
	fn test_empty_table_fails_fast() {
		let table = FrequencyTable::build("", 4, Granularity::Chars).unwrap();
		assert!(matches!(Generator::new(&table), Err(NgramError::EmptyTable)));
	}

	#[test]
	fn test_seed_length_checked() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		let input = GenerationInput::new("TH", 10).unwrap();
		assert!(matches!(
			generator.generate(&input),
			Err(NgramError::InvalidSeed { expected: 3, found: 2 })
		));
	}

	#[test]
	fn test_seed_is_normalized() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		assert_eq!(generator.seed_symbols("the").unwrap(), vec!["T", "H", "E"]);
	}

	#[test]
	fn test_length_three_is_the_seed() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		let input = GenerationInput::new("THE", 3).unwrap();
		let report = generator.generate(&input).unwrap();
		assert_eq!(report.sequence, "THE");
	}

	#[test]
	fn test_seed_truncated_to_length() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		let input = GenerationInput::new("THE", 2).unwrap();
		assert_eq!(generator.generate(&input).unwrap().sequence, "TH");
	}

	#[test]
	fn test_continuations_are_observed() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		let mut input = GenerationInput::new("THE", 200).unwrap();
		input.rng_seed = Some(11);
		let report = generator.generate(&input).unwrap();
		assert_eq!(report.symbols.len(), 200);
		assert!(report.sequence.starts_with("THE "));
		assert_eq!(report.symbols[3], " ");
	}

	#[test]
	fn test_unseen_seed_recovers() {
		let table = cat_table();
		let generator = Generator::new(&table).unwrap();
		for policy in [RecoveryPolicy::RestartSeed, RecoveryPolicy::RandomContext] {
			let mut input = GenerationInput::new("XYZ", 50).unwrap();
			input.recovery = policy;
			input.rng_seed = Some(5);
			let report = generator.generate(&input).unwrap();
			assert_eq!(report.symbols.len(), 50);
			assert!(report.sequence.starts_with("XYZ"));
			assert!(report.recoveries >= 1);
		}
	}

	#[test]
	fn test_dead_end_recovers_to_seed() {
		// "ABC" is followed by "D" once, and "BCD" is never followed by anything.
		let table = FrequencyTable::build("ABCD", 4, Granularity::Chars).unwrap();
		let generator = Generator::new(&table).unwrap();
		let input = GenerationInput::new("ABC", 9).unwrap();
		let report = generator.generate(&input).unwrap();
		assert_eq!(report.sequence, "ABCDDDDDD");
		assert_eq!(report.recoveries, 5);
	}

	#[test]
	fn test_fixed_rng_seed_is_reproducible() {
		let corpus = "IT WAS THE BEST OF TIMES. IT WAS THE WORST OF TIMES.";
		let table = FrequencyTable::build(corpus, 4, Granularity::Chars).unwrap();
		let generator = Generator::new(&table).unwrap();
		let mut input = GenerationInput::new("IT ", 300).unwrap();
		input.rng_seed = Some(2024);
		let first = generator.generate(&input).unwrap();
		let second = generator.generate(&input).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_word_bigrams_join_with_spaces() {
		let table = FrequencyTable::build("THE CAT SAT ON THE MAT.", 2, Granularity::Words).unwrap();
		let generator = Generator::new(&table).unwrap();
		let mut input = GenerationInput::new("the", 8).unwrap();
		input.rng_seed = Some(9);
		let report = generator.generate(&input).unwrap();
		assert_eq!(report.symbols.len(), 8);
		assert_eq!(report.sequence.split(' ').count(), 8);
		assert!(report.symbols[1] == "CAT" || report.symbols[1] == "MAT.");
	}

	#[test]
	fn test_table_without_transitions_fails_fast() {
		let mut table = FrequencyTable::new(4, Granularity::Chars).unwrap();
		table.insert_state(State::new("THE"));
		assert!(!table.is_empty());
		assert!(matches!(Generator::new(&table), Err(NgramError::EmptyTable)));
	}

	#[test]
	fn test_seed_without_transitions_still_reaches_length() {
		let mut table = FrequencyTable::build("ABCD", 4, Granularity::Chars).unwrap();
		table.insert_state(State::new("THE"));
		let generator = Generator::new(&table).unwrap();
		for policy in [RecoveryPolicy::RestartSeed, RecoveryPolicy::RandomContext] {
			let mut input = GenerationInput::new("THE", 10).unwrap();
			input.recovery = policy;
			input.rng_seed = Some(1);
			let report = generator.generate(&input).unwrap();
			assert_eq!(report.symbols.len(), 10);
			assert!(report.sequence.starts_with("THE"));
		}
	}
}
