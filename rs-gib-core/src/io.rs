use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::error::Result;
use crate::model::detector::Detector;
use crate::model::snapshot::ModelSnapshot;

/// Reads a text file and returns its non-blank lines, trimmed.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Suitable for corpora and labeled example lists (one entry per line)
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/corpus.txt` + `"json"` → `data/corpus.json`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> io::Result<PathBuf> {
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

/// Writes a snapshot to disk.
///
/// `.json` files get indented JSON; anything else gets the compact
/// `postcard` encoding.
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &ModelSnapshot) -> Result<()> {
	let path = path.as_ref();
	if is_json(path) {
		fs::write(path, snapshot.to_json_pretty()?)?;
	} else {
		fs::write(path, snapshot.to_bytes()?)?;
	}
	tracing::debug!("Model saved to {}", path.display());
	Ok(())
}

/// Reads a snapshot written by `save_snapshot`.
///
/// Only decodes it; validation happens when the snapshot is imported.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<ModelSnapshot> {
	let path = path.as_ref();
	if is_json(path) {
		ModelSnapshot::from_json(&fs::read_to_string(path)?)
	} else {
		ModelSnapshot::from_bytes(&fs::read(path)?)
	}
}

/// Loads a detector from a snapshot file.
pub fn load_detector<P: AsRef<Path>>(path: P) -> Result<Detector> {
	Detector::from_snapshot(&load_snapshot(path)?)
}

fn is_json(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
