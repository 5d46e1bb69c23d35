use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-process sequence number of temporary files created by `write_atomic`.
static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Reads a whole text file into memory.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/table.bin` + `"csv"` → `data/table.csv`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Writes `contents` to `path` so that a reader never observes a partial file.
///
/// The bytes go to a hidden sibling file first, which is flushed to disk and
/// then renamed over the target. On failure the temporary file is removed and
/// the target is left untouched.
///
/// # Notes
/// The temporary name carries the process id and a per-process counter, so
/// concurrent writers to the same target never share a temporary file. The
/// last rename wins.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let file_name = path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Output path has no filename"))?;

	let mut tmp_name = std::ffi::OsString::from(".");
	tmp_name.push(file_name);
	tmp_name.push(format!(".{}.{}.tmp", std::process::id(), TMP_COUNTER.fetch_add(1, Ordering::Relaxed)));
	let tmp_path = path.with_file_name(tmp_name);

	let result = (|| {
		let mut file = File::create_new(&tmp_path)?;
		file.write_all(contents)?;
		file.sync_all()?;
		fs::rename(&tmp_path, path)
	})();

	if result.is_err() {
		let _ = fs::remove_file(&tmp_path);
	}
	result
}
