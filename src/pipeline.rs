//! The ordered rewrite pipeline.
//!
//! Stages run strictly in sequence, each consuming the previous stage's text.
//! The source pass (decamelize through sort-includes) runs on every file; the
//! guard pass runs on headers only, after the source pass has been written.

use crate::config::Settings;
use crate::locate::HeaderLocator;
use crate::rules;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One named rewrite step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
	/// `fooBar` after ` _*(&!` becomes `foo_bar`.
	Decamelize,
	/// ` _member` becomes ` member_`.
	MoveUnderscore,
	/// `i++)` closing a `for` header becomes `++i)`.
	LoopIncrement,
	/// Block comments become line comments below the license header.
	CommentStyle,
	/// Bare quoted includes get their project path. Expects
	/// `#include` lines untouched by the identifier stages.
	HeaderPath,
	/// Legacy source-relative includes get the project root prefix.
	/// Runs after `HeaderPath` so resolved paths are already rooted.
	LegacyPrefix,
	/// Include block rebuilt as self, system, project.
	/// Runs last so it sorts the final include paths.
	SortIncludes,
	/// Header guard renamed after the file path.
	IncludeGuard,
}

impl Stage {
	/// Stages run on every file, in order.
	pub const SOURCE_PASS: [Stage; 7] = [
		Stage::Decamelize,
		Stage::MoveUnderscore,
		Stage::LoopIncrement,
		Stage::CommentStyle,
		Stage::HeaderPath,
		Stage::LegacyPrefix,
		Stage::SortIncludes,
	];

	/// Stages run on header files after the source pass was written back.
	pub const GUARD_PASS: [Stage; 1] = [Stage::IncludeGuard];

	/// Name used in config files and logs.
	pub fn as_str(&self) -> &'static str {
		match self {
			Stage::Decamelize => "decamelize",
			Stage::MoveUnderscore => "move-underscore",
			Stage::LoopIncrement => "loop-increment",
			Stage::CommentStyle => "comment-style",
			Stage::HeaderPath => "header-path",
			Stage::LegacyPrefix => "legacy-prefix",
			Stage::SortIncludes => "sort-includes",
			Stage::IncludeGuard => "include-guard",
		}
	}
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A non-fatal problem found while rewriting a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// Includes were left in place because a preprocessor conditional
	/// surrounds or interrupts the include block.
	AmbiguousReorder { file: PathBuf, line: usize },
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::AmbiguousReorder { file, .. } => {
				write!(f, "Include headers not sorted in {}", file.display())
			}
		}
	}
}

/// Output of a stage or pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	pub text: String,
	pub diagnostics: Vec<Diagnostic>,
}

impl Rewrite {
	fn unchanged(text: &str) -> Self {
		Rewrite {
			text: text.to_string(),
			diagnostics: Vec::new(),
		}
	}
}

/// Applies stages with the settings and header lookup of one batch.
pub struct Pipeline<'a> {
	settings: &'a Settings,
	locator: &'a dyn HeaderLocator,
}

impl<'a> Pipeline<'a> {
	pub fn new(settings: &'a Settings, locator: &'a dyn HeaderLocator) -> Self {
		Pipeline { settings, locator }
	}

	pub fn settings(&self) -> &Settings {
		self.settings
	}

	/// Whether `file` gets the guard pass.
	pub fn is_header(&self, file: &Path) -> bool {
		file.extension()
			.is_some_and(|ext| ext == self.settings.header_extension.as_str())
	}

	/// Apply a single stage, regardless of the skip list.
	pub fn apply(&self, stage: Stage, text: &str, file: &Path) -> Rewrite {
		let text = match stage {
			Stage::Decamelize => rules::decamelize(text),
			Stage::MoveUnderscore => rules::move_underscore(text),
			Stage::LoopIncrement => rules::prefix_loop_increment(text),
			Stage::CommentStyle => rules::convert_comments(text, self.settings.preserved_lines),
			Stage::HeaderPath => rules::resolve_header_paths(text, self.locator),
			Stage::LegacyPrefix => rules::prefix_legacy_paths(text, self.locator),
			Stage::SortIncludes => {
				return match rules::sort_includes(text, file) {
					Ok(sorted) => Rewrite {
						text: sorted,
						diagnostics: Vec::new(),
					},
					Err(refusal) => {
						tracing::info!(
							file = %file.display(),
							line = refusal.line,
							"conditional near includes, not sorting"
						);
						Rewrite {
							text: text.to_string(),
							diagnostics: vec![Diagnostic::AmbiguousReorder {
								file: file.to_path_buf(),
								line: refusal.line,
							}],
						}
					}
				};
			}
			Stage::IncludeGuard => {
				let guard = rules::guard_token(
					file,
					&self.settings.project_root,
					&self.settings.guard_prefix(),
				);
				rules::fix_include_guard(text, &guard)
			}
		};

		Rewrite {
			text,
			diagnostics: Vec::new(),
		}
	}

	/// Apply `stages` in order, skipping the ones the settings disable.
	pub fn run(&self, stages: &[Stage], text: &str, file: &Path) -> Rewrite {
		let mut result = Rewrite::unchanged(text);

		for &stage in stages {
			if !self.settings.is_enabled(stage) {
				tracing::debug!(%stage, "stage skipped by config");
				continue;
			}

			let step = self.apply(stage, &result.text, file);
			tracing::debug!(
				%stage,
				file = %file.display(),
				changed = step.text != result.text,
				"stage applied"
			);
			result.text = step.text;
			result.diagnostics.extend(step.diagnostics);
		}

		result
	}

	/// Stages 1 to 7.
	pub fn source_pass(&self, text: &str, file: &Path) -> Rewrite {
		self.run(&Stage::SOURCE_PASS, text, file)
	}

	/// Stage 8; meant for headers re-read after the source pass.
	pub fn guard_pass(&self, text: &str, file: &Path) -> Rewrite {
		self.run(&Stage::GUARD_PASS, text, file)
	}
}
