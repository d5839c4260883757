use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Block terminator alone on its line, together with the newline before it.
static TERMINATOR_LINE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\n[ ]*\*/[ ]*").expect("valid terminator pattern"));

static TERMINATOR_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\*/").expect("valid terminator pattern"));

/// Leading `*` of a continuation line. The optional group catches a word
/// character glued to the star (`*ptr = 0;`), which marks code, not comment.
static CONTINUATION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)^[ ]*\*(\w)?[ ]*").expect("valid continuation pattern"));

static OPENER_LINE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"/\*[ ]*\n").expect("valid opener pattern"));

static OPENER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"/\*[ ]*(.)").expect("valid opener pattern"));

/// Rewrite `/* ... */` comments as `//` comments.
///
/// The first `preserved_lines` lines (the license header) are copied
/// verbatim, but never past the comments and blank lines that open the
/// file. Nested or irregular comments are converted on a best-effort basis.
pub fn convert_comments(text: &str, preserved_lines: usize) -> String {
	let split = preserved_prefix_len(text, preserved_lines);
	let (header, code) = text.split_at(split);

	let code = TERMINATOR_LINE_RE.replace_all(code, "");
	let code = TERMINATOR_RE.replace_all(&code, "");
	let code = CONTINUATION_RE.replace_all(&code, |caps: &Captures| {
		if caps.get(1).is_some() {
			caps[0].to_string()
		} else {
			"// ".to_string()
		}
	});
	let code = OPENER_LINE_RE.replace_all(&code, "");
	let code = OPENER_RE.replace_all(&code, "// ${1}");

	let mut out = String::with_capacity(header.len() + code.len());
	out.push_str(header);
	out.push_str(&code);
	out
}

/// Byte length of the preserved header: at most `lines` lines, newlines
/// included, stopping at the first line of code.
fn preserved_prefix_len(text: &str, lines: usize) -> usize {
	let mut len = 0;
	let mut in_block = false;

	for line in text.split_inclusive('\n').take(lines) {
		let trimmed = line.trim();
		if in_block {
			in_block = !trimmed.contains("*/");
		} else if trimmed.starts_with("/*") {
			in_block = !trimmed[2..].contains("*/");
		} else if !(trimmed.is_empty() || trimmed.starts_with("//")) {
			break;
		}
		len += line.len();
	}

	len
}

#[cfg(test)]
mod tests {
	use super::*;

	const LICENSE: &str = "/*\n\
		\x20*  Copyright (c) 2012 The WebRTC project authors. All Rights Reserved.\n\
		\x20*\n\
		\x20*  Use of this source code is governed by a BSD-style license\n\
		\x20*  that can be found in the LICENSE file in the root of the source\n\
		\x20*  tree. An additional intellectual property rights grant can be found\n\
		\x20*  in the file PATENTS.  All contributing project authors may\n\
		\x20*  be found in the AUTHORS file in the root of the source tree.\n\
		\x20*/\n\
		\n";

	#[test]
	fn test_block_comment_becomes_line_comment() {
		assert_eq!(convert_comments("/*\n * text\n */\n", 0), "// text\n");
	}

	#[test]
	fn test_license_block_is_preserved() {
		let text = format!("{}/* Frame size */\nint size;\n", LICENSE);
		let out = convert_comments(&text, 10);

		assert!(out.starts_with(LICENSE));
		assert_eq!(&out[LICENSE.len()..], "// Frame size \nint size;\n");
	}

	#[test]
	fn test_multi_line_comment() {
		let text = "/*\n * Returns the delay.\n *\n * Negative on error.\n */\nint Delay();\n";
		assert_eq!(
			convert_comments(text, 0),
			"// Returns the delay.\n// \n// Negative on error.\nint Delay();\n"
		);
	}

	#[test]
	fn test_opener_with_text() {
		assert_eq!(
			convert_comments("/* Called on every frame.\n *   ms since start.\n */\n", 0),
			"// Called on every frame.\n// ms since start.\n"
		);
	}

	#[test]
	fn test_preserved_header_stops_at_code() {
		let text = "// Copyright.\n#include <a>\n/* one\n * two\n */\nint y;\n";
		assert_eq!(
			convert_comments(text, 4),
			"// Copyright.\n#include <a>\n// one\n// two\nint y;\n"
		);
	}

	#[test]
	fn test_pointer_dereference_is_not_a_continuation() {
		let text = "  *ptr = 0;\n";
		assert_eq!(convert_comments(text, 0), text);
	}

	#[test]
	fn test_short_file_is_untouched_by_preservation() {
		let text = "/* a */\n";
		assert_eq!(convert_comments(text, 10), text);
	}

	#[test]
	fn test_line_comments_are_idempotent() {
		let text = "// Already converted.\nint x;  // trailing\n";
		assert_eq!(convert_comments(text, 0), text);

		let once = convert_comments("/*\n * Doc.\n */\nvoid F();\n", 0);
		assert_eq!(convert_comments(&once, 0), once);
	}
}
