use regex::Regex;
use std::sync::LazyLock;

/// A single-line `for (...; ...; x++)` header, split into the first two
/// clauses, the spacing before the increment and the incremented name.
/// Clauses can't span a `;`, so every header on a line matches by itself.
static FOR_POSTFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(for \([^;\n]*;[^;\n]*;)([ \t]*)(\w+)\+\+\)").expect("valid for-loop pattern")
});

/// Turn `x++` into `++x` in the increment clause of `for` headers.
///
/// Only the trailing `name++)` of the header changes; decrements and
/// compound assignments are left alone.
pub fn prefix_loop_increment(text: &str) -> String {
	FOR_POSTFIX_RE
		.replace_all(text, "${1}${2}++${3})")
		.into_owned()
}
