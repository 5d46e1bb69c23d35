use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::io::read_text;

/// Sentence terminator kept in the corpus.
pub const TERMINATOR: char = '.';

/// Start/end markers delimiting the content of a source.
///
/// The content is everything after the line holding `start` and before the
/// line holding `end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
	/// Prefix of the line preceding the content.
	pub start: String,
	/// Prefix of the line following the content.
	pub end: String,
}

impl Default for Markers {
	/// Project Gutenberg header/footer lines.
	fn default() -> Self {
		Self {
			start: "*** START OF".to_owned(),
			end: "*** END OF".to_owned(),
		}
	}
}

/// Options of a `Normalizer`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
	/// Boilerplate markers, Project Gutenberg ones by default.
	pub markers: Markers,
	/// Squeeze runs of spaces into a single space after cleaning.
	pub collapse_spaces: bool,
}

/// Turns raw text sources into one cleaned corpus.
///
/// Cleaning keeps `A`-`Z` (after uppercasing), spaces and `.`; every other
/// character becomes a space. Missing markers are not fatal: the source is
/// kept whole and a warning is logged.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
	config: NormalizerConfig,
}

impl Normalizer {
	/// Creates a normalizer with the given configuration.
	pub fn new(config: NormalizerConfig) -> Self {
		Self { config }
	}

	/// Returns the content region of `text`, without header and footer.
	///
	/// `name` only identifies the source in log records.
	pub fn strip_boilerplate<'a>(&self, name: &str, text: &'a str) -> &'a str {
		let markers = &self.config.markers;
		let mut content = text;

		match content.find(&markers.start) {
			Some(index) => {
				// Skip the rest of the marker line
				content = match content[index..].find('\n') {
					Some(eol) => &content[index + eol + 1..],
					None => "",
				};
			}
			None => warn!("{name}: start marker '{}' not found, keeping header", markers.start),
		}

		match content.find(&markers.end) {
			Some(index) => {
				// Cut at the beginning of the marker line
				let line_start = content[..index].rfind('\n').map_or(0, |eol| eol + 1);
				content = &content[..line_start];
			}
			None => warn!("{name}: end marker '{}' not found, keeping footer", markers.end),
		}

		content
	}

	/// Uppercases `text` and replaces every character that is not `A`-`Z`,
	/// a space or the terminator with a space.
	pub fn clean(&self, text: &str) -> String {
		let mut cleaned = String::with_capacity(text.len());
		let mut previous_space = false;
		for c in text.chars().map(normalize_char) {
			if self.config.collapse_spaces && c == ' ' && previous_space {
				continue;
			}
			previous_space = c == ' ';
			cleaned.push(c);
		}
		cleaned
	}

	/// Strips the boilerplate of one source and cleans the remaining content.
	pub fn normalize_source(&self, name: &str, text: &str) -> String {
		let content = self.strip_boilerplate(name, text);
		let cleaned = self.clean(content);
		debug!("{name}: {} characters kept out of {}", cleaned.len(), text.len());
		cleaned
	}

	/// Normalizes every source and concatenates the results in the given
	/// order, separated by a single space. Empty sources contribute nothing.
	pub fn normalize_sources<'a, I>(&self, sources: I) -> String
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		sources
			.into_iter()
			.map(|(name, text)| self.normalize_source(name, text))
			.filter(|cleaned| !cleaned.is_empty())
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Reads the files and normalizes them as `normalize_sources` does.
	///
	/// # Errors
	/// Returns an error if any file cannot be read.
	pub fn normalize_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<String> {
		let mut sources = Vec::with_capacity(paths.len());
		for path in paths {
			let path = path.as_ref();
			sources.push((path.display().to_string(), read_text(path)?));
		}
		Ok(self.normalize_sources(sources.iter().map(|(name, text)| (name.as_str(), text.as_str()))))
	}
}

/// Maps one character to its corpus form.
pub fn normalize_char(c: char) -> char {
	if c.is_ascii_alphabetic() {
		c.to_ascii_uppercase()
	} else if c == ' ' || c == TERMINATOR {
		c
	} else {
		' '
	}
}
