use regex::Regex;
use std::path::{Component, Path};
use std::sync::LazyLock;

static IFNDEF_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[ \t]*#[ \t]*ifndef[ \t]+(\w+)").expect("valid ifndef pattern"));

static DEFINE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[ \t]*#[ \t]*define[ \t]+(\w+)").expect("valid define pattern"));

static ENDIF_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[ \t]*#[ \t]*endif[ \t]*//[ \t]*(\w+)").expect("valid endif pattern")
});

/// Canonical include guard for a header path.
///
/// Everything up to and including the last `project_root` component is
/// dropped, the rest is joined with `_`, uppercased, and any character that
/// cannot appear in a macro name becomes `_`. The result is wrapped as
/// `<prefix><PATH>_`, so `webrtc/video/codec.h` gives `WEBRTC_VIDEO_CODEC_H_`.
pub fn guard_token(path: &Path, project_root: &str, prefix: &str) -> String {
	let parts: Vec<String> = path
		.components()
		.filter_map(|c| match c {
			Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
			_ => None,
		})
		.collect();

	let start = parts
		.iter()
		.rposition(|p| p == project_root)
		.map_or(0, |i| i + 1);

	let body: String = parts[start..]
		.join("_")
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() {
				c.to_ascii_uppercase()
			} else {
				'_'
			}
		})
		.collect();

	format!("{}{}_", prefix, body)
}

/// Rewrite a header's include guard to `guard`.
///
/// The old guard is the macro of the first `#ifndef X` whose next non-blank
/// line is `#define X`. The first `#ifndef X`, the first `#define X` and the
/// first `#endif  // X` each get `X` replaced; the rest of those lines is
/// kept. Headers without a recognizable guard come back unchanged.
pub fn fix_include_guard(text: &str, guard: &str) -> String {
	let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();

	let Some(old) = find_guard(&lines) else {
		return text.to_string();
	};
	if old == guard {
		return text.to_string();
	}

	for re in [&*IFNDEF_RE, &*DEFINE_RE, &*ENDIF_RE] {
		replace_first(&mut lines, re, &old, guard);
	}

	lines.concat()
}

fn find_guard(lines: &[String]) -> Option<String> {
	for (i, line) in lines.iter().enumerate() {
		let Some(caps) = IFNDEF_RE.captures(line) else {
			continue;
		};
		let defined = lines[i + 1..]
			.iter()
			.find(|l| !l.trim().is_empty())
			.and_then(|l| DEFINE_RE.captures(l));
		if let Some(def) = defined
			&& def[1] == caps[1]
		{
			return Some(caps[1].to_string());
		}
	}
	None
}

fn replace_first(lines: &mut [String], re: &Regex, old: &str, new: &str) {
	for line in lines.iter_mut() {
		let range = re
			.captures(line)
			.and_then(|caps| caps.get(1))
			.filter(|m| m.as_str() == old)
			.map(|m| m.range());

		if let Some(range) = range {
			line.replace_range(range, new);
			return;
		}
	}
}
