use crate::locate::{HeaderLocator, ProjectTree, compare_candidates, to_slash_relative};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

/// A [`ProjectTree`] walked once, answering lookups from memory.
///
/// Used when a batch touches many files; the tree is assumed not to gain or
/// lose headers while the batch runs.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
	project_root: String,
	headers: HashMap<String, String>,
	top_level_dirs: Vec<String>,
}

impl HeaderIndex {
	/// Walk `base_dir/project_root` and record every file by name.
	pub fn build(base_dir: impl Into<PathBuf>, project_root: impl Into<String>) -> Self {
		let tree = ProjectTree::new(base_dir, project_root);
		let mut headers: HashMap<String, String> = HashMap::new();

		for entry in tree.files() {
			let Some(name) = entry.file_name().to_str() else {
				continue;
			};
			let Some(rel) = to_slash_relative(tree.base_dir(), entry.path()) else {
				continue;
			};

			match headers.get(name) {
				Some(existing) if compare_candidates(existing, &rel) != Ordering::Greater => {}
				_ => {
					headers.insert(name.to_string(), rel);
				}
			}
		}

		tracing::debug!(
			root = %tree.search_root().display(),
			files = headers.len(),
			"indexed project tree"
		);

		HeaderIndex {
			top_level_dirs: tree.top_level_dirs(),
			project_root: tree.project_root().to_string(),
			headers,
		}
	}

	pub fn len(&self) -> usize {
		self.headers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.headers.is_empty()
	}
}

impl HeaderLocator for HeaderIndex {
	fn project_root(&self) -> &str {
		&self.project_root
	}

	fn locate(&self, file_name: &str) -> Option<String> {
		let found = self.headers.get(file_name).cloned();
		if found.is_none() {
			tracing::debug!(header = file_name, "header not in index");
		}
		found
	}

	fn top_level_dirs(&self) -> Vec<String> {
		self.top_level_dirs.clone()
	}
}
