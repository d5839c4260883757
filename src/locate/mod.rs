//! Header lookup over the project tree.
//!
//! This module handles:
//! - Finding a header's project-relative path from its bare file name
//! - Listing the top-level directories of the project tree
//!
//! Stages only see the [`HeaderLocator`] trait. [`ProjectTree`] walks the
//! filesystem on every query; [`HeaderIndex`] walks once up front.

pub mod index;
pub mod tree;

pub use index::HeaderIndex;
pub use tree::ProjectTree;

use std::cmp::Ordering;
use std::path::{Component, Path};

/// Read-only queries the include stages make against the project tree.
pub trait HeaderLocator {
	/// Name of the project tree directory, e.g. `webrtc`.
	fn project_root(&self) -> &str;

	/// Path of the header called `file_name`, relative to the base directory
	/// and `/`-separated (so it starts with the project root name).
	///
	/// When several files share the name, the one with the fewest path
	/// components wins, then the lexicographically smallest path.
	fn locate(&self, file_name: &str) -> Option<String>;

	/// Names of the directories directly under the project root, sorted.
	fn top_level_dirs(&self) -> Vec<String>;
}

/// `path` relative to `base`, joined with `/` regardless of platform.
pub(crate) fn to_slash_relative(base: &Path, path: &Path) -> Option<String> {
	let relative = path.strip_prefix(base).ok()?;
	let parts: Vec<String> = relative
		.components()
		.filter_map(|c| match c {
			Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
			_ => None,
		})
		.collect();

	if parts.is_empty() {
		None
	} else {
		Some(parts.join("/"))
	}
}

/// Tie-break between two candidate paths for the same header name.
pub(crate) fn compare_candidates(a: &str, b: &str) -> Ordering {
	let depth = |p: &str| p.matches('/').count();
	depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
}
