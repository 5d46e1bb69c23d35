//! Token-length statistics over generated or reference text.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::io::read_text;
use crate::normalizer::TERMINATOR;

/// Splits `text` on whitespace and sentence terminators.
/// Separators never belong to a token and no empty token is produced.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
	text.split(|c: char| c.is_whitespace() || c == TERMINATOR)
		.filter(|token| !token.is_empty())
}

/// Mapping from token length (in characters) to number of tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LengthHistogram {
	counts: BTreeMap<usize, usize>,
}

impl LengthHistogram {
	/// Counts the tokens of `text` by length.
	pub fn from_text(text: &str) -> Self {
		let mut histogram = Self::default();
		for token in tokenize(text) {
			*histogram.counts.entry(token.chars().count()).or_insert(0) += 1;
		}
		histogram
	}

	/// Length -> count, in ascending length order.
	pub fn counts(&self) -> &BTreeMap<usize, usize> {
		&self.counts
	}

	/// Number of tokens of `length` characters (0 if none).
	pub fn get(&self, length: usize) -> usize {
		self.counts.get(&length).copied().unwrap_or(0)
	}

	/// Total number of tokens.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Average token length, `None` when there is no token.
	pub fn average(&self) -> Option<f64> {
		let total = self.total();
		if total == 0 {
			return None;
		}
		let letters: usize = self.counts.iter().map(|(length, count)| length * count).sum();
		Some(letters as f64 / total as f64)
	}
}

impl fmt::Display for LengthHistogram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (length, count) in &self.counts {
			writeln!(f, "{length} {count}")?;
		}
		Ok(())
	}
}

/// Reference dictionary, stored uppercased.
#[derive(Clone, Debug, Default)]
pub struct WordList {
	words: HashSet<String>,
}

impl WordList {
	/// Builds a list from whitespace-separated words.
	pub fn from_text(text: &str) -> Self {
		Self { words: text.split_whitespace().map(str::to_uppercase).collect() }
	}

	/// Loads a dictionary file (whitespace-separated words).
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		Ok(Self::from_text(&read_text(path)?))
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if the list holds no word.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Case-insensitive membership test.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(&word.to_uppercase())
	}

	/// Share of the tokens of `text` found in the list, `None` when `text`
	/// has no token.
	pub fn proportion_known(&self, text: &str) -> Option<f64> {
		let (known, total) = tokenize(text).fold((0usize, 0usize), |(known, total), token| {
			(known + usize::from(self.contains(token)), total + 1)
		});
		(total > 0).then(|| known as f64 / total as f64)
	}
}

/// Histogram plus the optional scalar statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
	pub histogram: LengthHistogram,
	/// Average token length, `None` for a text without tokens.
	pub average: Option<f64>,
	/// Share of real words, only computed when a word list is given.
	pub known_ratio: Option<f64>,
}

/// Tabulates token lengths of `text` and, when a word list is supplied, the
/// proportion of its tokens that are real words.
pub fn analyze(text: &str, words: Option<&WordList>) -> Analysis {
	let histogram = LengthHistogram::from_text(text);
	let average = histogram.average();
	let known_ratio = words.and_then(|list| list.proportion_known(text));
	Analysis { histogram, average, known_ratio }
}
