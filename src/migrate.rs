//! In-place migration of files on disk.
//!
//! Writes are not transactional: the source pass result replaces the file
//! before a header is re-read for its guard pass.

use crate::error::{Result, RestyleError};
use crate::pipeline::{Diagnostic, Pipeline};
use std::path::{Path, PathBuf};

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileReport {
	pub path: PathBuf,

	/// Whether the file content differs from what was read.
	pub changed: bool,

	/// Whether the guard pass ran.
	pub guard_pass: bool,

	pub diagnostics: Vec<Diagnostic>,
}

/// Run the pipeline on `path` and write the result back.
///
/// Headers are re-read after the source pass is written and get the guard
/// pass as a separate write.
pub fn migrate_file(path: &Path, pipeline: &Pipeline) -> Result<FileReport> {
	let original = read_source(path)?;
	let source = pipeline.source_pass(&original, path);
	write_source(path, &source.text)?;

	let mut report = FileReport {
		path: path.to_path_buf(),
		changed: source.text != original,
		guard_pass: false,
		diagnostics: source.diagnostics,
	};

	if pipeline.is_header(path) {
		let reread = read_source(path)?;
		let guarded = pipeline.guard_pass(&reread, path);
		write_source(path, &guarded.text)?;

		report.changed |= guarded.text != reread;
		report.guard_pass = true;
		report.diagnostics.extend(guarded.diagnostics);
	}

	tracing::debug!(
		path = %path.display(),
		changed = report.changed,
		diagnostics = report.diagnostics.len(),
		"file migrated"
	);

	Ok(report)
}

fn read_source(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| RestyleError::SourceReadError {
		path: path.to_path_buf(),
		source,
	})
}

fn write_source(path: &Path, text: &str) -> Result<()> {
	std::fs::write(path, text).map_err(|source| RestyleError::SourceWriteError {
		path: path.to_path_buf(),
		source,
	})
}
