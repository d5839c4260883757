use regex::Regex;
use std::sync::LazyLock;

/// Characters after which a camelCase token is considered an identifier start.
const DECAMEL_BOUNDARY: &[u8] = b" _*(&!";

/// `<boundary>_<word>` where the word starts lowercase or with a digit.
static LEADING_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"([ *!&(\[\]])_([a-z0-9][A-Za-z0-9_]*)").expect("valid underscore pattern")
});

/// Rewrite camelCase tokens to snake_case until nothing changes.
///
/// A token qualifies when it follows one of ` _*(&!` and reads as a lowercase
/// run, an uppercase run and at most one trailing lowercase letter. The
/// lowercase run `k` alone marks a constant (`kMaxSize`) and is left as is.
/// Every rewrite removes an uppercase boundary, so the loop terminates.
pub fn decamelize(text: &str) -> String {
	let mut current = text.to_string();

	loop {
		let (next, changed) = decamelize_pass(&current);
		if !changed {
			return next;
		}
		current = next;
	}
}

/// One left-to-right pass. Matches never overlap and are judged against the
/// text as it was at the start of the pass.
fn decamelize_pass(text: &str) -> (String, bool) {
	let bytes = text.as_bytes();
	let mut out = String::with_capacity(text.len() + 8);
	let mut copied = 0;
	let mut changed = false;
	let mut i = 1;

	while i < bytes.len() {
		if !DECAMEL_BOUNDARY.contains(&bytes[i - 1]) {
			i += 1;
			continue;
		}

		let lower_end = scan_while(bytes, i, |b| b.is_ascii_lowercase());
		let upper_end = scan_while(bytes, lower_end, |b| b.is_ascii_uppercase());

		if lower_end == i || upper_end == lower_end || &bytes[i..lower_end] == b"k" {
			i += 1;
			continue;
		}

		let end = if upper_end < bytes.len() && bytes[upper_end].is_ascii_lowercase() {
			upper_end + 1
		} else {
			upper_end
		};

		out.push_str(&text[copied..i]);
		out.push_str(&text[i..lower_end]);
		out.push('_');
		out.push_str(&text[lower_end..upper_end].to_ascii_lowercase());
		out.push_str(&text[upper_end..end]);
		copied = end;
		changed = true;
		i = end;
	}

	out.push_str(&text[copied..]);
	(out, changed)
}

fn scan_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
	let mut end = start;
	while end < bytes.len() && pred(bytes[end]) {
		end += 1;
	}
	end
}

/// Move a single leading underscore of a member-style name to the end:
/// `_count` becomes `count_`.
///
/// Names starting with `__` or an uppercase letter (reserved identifiers and
/// macros) are not touched. Single pass.
pub fn move_underscore(text: &str) -> String {
	LEADING_UNDERSCORE_RE
		.replace_all(text, "${1}${2}_")
		.into_owned()
}
