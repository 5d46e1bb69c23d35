//! CSV export of a frequency table.

use std::path::Path;

use crate::error::Result;
use crate::io::write_atomic;
use crate::model::frequency_table::FrequencyTable;

const HEADER: &str = "context,next,count";

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
	if field.contains(',') || field.contains('"') || field.contains('\n') {
		format!("\"{}\"", field.replace('"', "\"\""))
	} else {
		field.to_string()
	}
}

/// Renders the table as CSV: a header row, then one row per observed
/// `(context, next)` pair in key order.
pub fn to_csv(table: &FrequencyTable) -> String {
	let mut output = String::from(HEADER);
	output.push('\n');

	for context in table.contexts() {
		let Some(transitions) = table.transitions(context) else {
			continue;
		};
		for (next, count) in transitions.iter().filter(|(_, count)| **count > 0) {
			output.push_str(&format!("{},{},{}\n", escape_field(context), escape_field(next), count));
		}
	}

	output
}

/// Writes `to_csv(table)` atomically to `path`.
pub fn write_csv<P: AsRef<Path>>(table: &FrequencyTable, path: P) -> Result<()> {
	write_atomic(path, to_csv(table).as_bytes())?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::granularity::Granularity;

	#[test]
	fn test_escape_field() {
		assert_eq!(escape_field("THE"), "THE");
		assert_eq!(escape_field("A,B"), "\"A,B\"");
		assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
	}

	#[test]
	fn test_to_csv_rows_in_key_order() {
		let table = FrequencyTable::build("ABAB", 2, Granularity::Chars).unwrap();
		assert_eq!(to_csv(&table), "context,next,count\nA,B,2\nB,A,1\n");
	}

	#[test]
	fn test_empty_table_has_header_only() {
		let table = FrequencyTable::build("", 2, Granularity::Chars).unwrap();
		assert_eq!(to_csv(&table), "context,next,count\n");
	}

	#[test]
	fn test_spaces_are_verbatim() {
		let table = FrequencyTable::build("A B", 2, Granularity::Chars).unwrap();
		assert_eq!(to_csv(&table), "context,next,count\n ,B,1\nA, ,1\n");
	}

	#[test]
	fn test_write_csv() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("table.csv");
		let table = FrequencyTable::build("ABAB", 2, Granularity::Chars).unwrap();
		write_csv(&table, &path).unwrap();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), to_csv(&table));
	}
}
