use crate::locate::HeaderLocator;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// Quoted include without a directory: `#include "foo.h"`.
static BARE_INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?m)^([ \t]*#[ \t]*include[ \t]*)"([^"/\n]+)""#).expect("valid include pattern")
});

/// Quoted include carrying a directory: `#include "video_engine/vie.h"`.
static PATHED_INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?m)^([ \t]*#[ \t]*include[ \t]*)"([^"/\n]+)/([^"\n]+)""#)
		.expect("valid include pattern")
});

static INCLUDE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^[ \t]*#[ \t]*include\b[ \t]*(?:([<"])([^>"]*)[>"])?"#)
		.expect("valid include pattern")
});

static CONDITIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[ \t]*#[ \t]*(if|ifdef|ifndef|elif|else|endif)\b[ \t]*(\w*)")
		.expect("valid conditional pattern")
});

static DEFINE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[ \t]*#[ \t]*define[ \t]+(\w+)").expect("valid define pattern")
});

/// Group an include falls into when the block is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
	/// The header belonging to the file being rewritten.
	SelfHeader,
	/// `<...>` includes.
	System,
	/// Everything else.
	Project,
}

/// One `#include` line of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
	/// Line text without its line terminator.
	pub line: String,

	/// Referenced header as written between the delimiters.
	pub header: String,

	pub kind: IncludeKind,
}

impl IncludeDirective {
	/// Parse an include line; `None` for any other line.
	pub fn parse(line: &str) -> Option<Self> {
		let caps = INCLUDE_LINE_RE.captures(line)?;
		let line = line.trim_end_matches(['\n', '\r']).to_string();
		let system = caps.get(1).is_some_and(|d| d.as_str() == "<");
		let header = match caps.get(2) {
			Some(h) => h.as_str().to_string(),
			None => line[caps[0].len()..].trim().to_string(),
		};

		Some(IncludeDirective {
			line,
			header,
			kind: if system {
				IncludeKind::System
			} else {
				IncludeKind::Project
			},
		})
	}

	/// Whether the header's file stem equals `stem`.
	fn is_header_for(&self, stem: &std::ffi::OsStr) -> bool {
		Path::new(&self.header).file_stem() == Some(stem)
	}
}

/// The include sorter found a conditional directive around or inside the
/// include block and left the text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbiguousReorder {
	/// 1-based line of the first offending directive or include.
	pub line: usize,
}

/// Give bare quoted includes their path inside the project tree.
///
/// `#include "foo.h"` becomes `#include "webrtc/sub/dir/foo.h"` when the
/// locator finds `foo.h`; unknown headers are left as written.
pub fn resolve_header_paths(text: &str, locator: &dyn HeaderLocator) -> String {
	BARE_INCLUDE_RE
		.replace_all(text, |caps: &Captures| match locator.locate(&caps[2]) {
			Some(path) => format!("{}\"{}\"", &caps[1], path),
			None => caps[0].to_string(),
		})
		.into_owned()
}

/// Root legacy source-relative includes in the project tree.
///
/// `#include "video_engine/vie.h"` becomes
/// `#include "webrtc/video_engine/vie.h"` when `video_engine` is a
/// directory directly under the project root.
pub fn prefix_legacy_paths(text: &str, locator: &dyn HeaderLocator) -> String {
	let root = locator.project_root();
	let dirs = locator.top_level_dirs();

	PATHED_INCLUDE_RE
		.replace_all(text, |caps: &Captures| {
			let first = &caps[2];
			if first != root && dirs.iter().any(|d| d == first) {
				format!("{}\"{}/{}/{}\"", &caps[1], root, first, &caps[3])
			} else {
				caps[0].to_string()
			}
		})
		.into_owned()
}

/// Sort the include block of `file`'s text.
///
/// The block starts at the first include and runs through the include lines
/// that follow it, separated only by blank lines, line comments or
/// conditional directives. Includes after the first code line stay where they
/// are. The rebuilt block is the file's own header, then `<...>` includes,
/// then the rest, each group sorted by line text and separated by one blank
/// line. Blank lines inside the block are dropped and comments follow it.
/// Each include keeps its own line terminator.
///
/// Refuses when an include sits inside a conditional other than the include
/// guard, or a conditional directive appears inside the block.
pub fn sort_includes(text: &str, file: &Path) -> Result<String, AmbiguousReorder> {
	let lines: Vec<&str> = text.split_inclusive('\n').collect();

	let Some(first) = lines.iter().position(|l| INCLUDE_LINE_RE.is_match(l)) else {
		return Ok(text.to_string());
	};
	let last = block_end(&lines, first);

	check_conditionals(&lines, first, last)?;

	let eol = line_ending(lines[first]).unwrap_or("\n");
	let mut includes: Vec<(IncludeDirective, &str)> = lines[first..=last]
		.iter()
		.filter_map(|l| IncludeDirective::parse(l).map(|inc| (inc, line_ending(l).unwrap_or(eol))))
		.collect();
	if let Some(stem) = file.file_stem()
		&& let Some((own, _)) = includes.iter_mut().find(|(inc, _)| inc.is_header_for(stem))
	{
		own.kind = IncludeKind::SelfHeader;
	}

	let mut self_header = Vec::new();
	let mut system = Vec::new();
	let mut project = Vec::new();
	for (inc, end) in includes {
		let entry = (inc.line, end);
		match inc.kind {
			IncludeKind::SelfHeader => self_header.push(entry),
			IncludeKind::System => system.push(entry),
			IncludeKind::Project => project.push(entry),
		}
	}
	system.sort_by(|a, b| a.0.cmp(&b.0));
	project.sort_by(|a, b| a.0.cmp(&b.0));

	let groups: Vec<Vec<(String, &str)>> = [self_header, system, project]
		.into_iter()
		.filter(|g| !g.is_empty())
		.collect();

	let mut out = String::with_capacity(text.len() + 4);
	for line in &lines[..first] {
		out.push_str(line);
	}
	for (i, group) in groups.iter().enumerate() {
		if i > 0 {
			out.push_str(eol);
		}
		for (line, end) in group {
			out.push_str(line);
			out.push_str(end);
		}
	}

	let carried: Vec<&str> = lines[first..=last]
		.iter()
		.filter(|l| !l.trim().is_empty() && IncludeDirective::parse(l).is_none())
		.copied()
		.collect();
	if !carried.is_empty() {
		out.push_str(eol);
		for line in carried {
			out.push_str(line);
		}
	}

	for line in &lines[last + 1..] {
		out.push_str(line);
	}

	Ok(out)
}

/// Index of the last include in the block that starts at `first`.
fn block_end(lines: &[&str], first: usize) -> usize {
	let mut last = first;
	for (i, line) in lines.iter().enumerate().skip(first + 1) {
		let trimmed = line.trim();
		let between =
			trimmed.is_empty() || trimmed.starts_with("//") || CONDITIONAL_RE.is_match(line);
		if INCLUDE_LINE_RE.is_match(line) {
			last = i;
		} else if !between {
			break;
		}
	}
	last
}

fn line_ending(line: &str) -> Option<&'static str> {
	if line.ends_with("\r\n") {
		Some("\r\n")
	} else if line.ends_with('\n') {
		Some("\n")
	} else {
		None
	}
}

/// Walk the conditional structure and reject layouts where moving includes
/// could change what gets compiled.
fn check_conditionals(lines: &[&str], first: usize, last: usize) -> Result<(), AmbiguousReorder> {
	// One entry per open conditional: true for an include guard.
	let mut open: Vec<bool> = Vec::new();

	for (i, line) in lines.iter().enumerate() {
		let in_span = (first..=last).contains(&i);

		if let Some(caps) = CONDITIONAL_RE.captures(line) {
			if in_span {
				return Err(AmbiguousReorder { line: i + 1 });
			}
			match &caps[1] {
				"if" | "ifdef" => open.push(false),
				"ifndef" => open.push(is_guard_open(lines, i, &caps[2])),
				"endif" => {
					open.pop();
				}
				_ => {}
			}
		} else if in_span && open.iter().any(|guard| !guard) && INCLUDE_LINE_RE.is_match(line) {
			return Err(AmbiguousReorder { line: i + 1 });
		}

		if i > last {
			break;
		}
	}

	Ok(())
}

/// `#ifndef X` whose next non-blank line is `#define X`.
fn is_guard_open(lines: &[&str], at: usize, macro_name: &str) -> bool {
	if macro_name.is_empty() {
		return false;
	}
	lines[at + 1..]
		.iter()
		.find(|l| !l.trim().is_empty())
		.and_then(|l| DEFINE_RE.captures(l))
		.is_some_and(|caps| &caps[1] == macro_name)
}
