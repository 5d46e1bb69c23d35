use serde::{Deserialize, Serialize};

/// What a single symbol of the model is.
///
/// - `Chars`: every character is a symbol (character n-grams).
/// - `Words`: whitespace-delimited tokens are symbols (token n-grams).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Granularity {
	#[default]
	Chars,
	Words,
}

impl Granularity {
	/// Splits a text into symbols.
	pub fn split(&self, text: &str) -> Vec<String> {
		match self {
			Granularity::Chars => text.chars().map(String::from).collect(),
			Granularity::Words => text.split_whitespace().map(str::to_owned).collect(),
		}
	}

	/// Joins symbols back into text.
	///
	/// Characters are concatenated, words are separated by a single space.
	pub fn join<S: AsRef<str>>(&self, symbols: &[S]) -> String {
		let separator = match self {
			Granularity::Chars => "",
			Granularity::Words => " ",
		};
		symbols
			.iter()
			.map(AsRef::as_ref)
			.collect::<Vec<_>>()
			.join(separator)
	}
}
