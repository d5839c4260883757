use crate::locate::{HeaderLocator, compare_candidates, to_slash_relative};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The project tree on disk, queried fresh on every call.
#[derive(Debug, Clone)]
pub struct ProjectTree {
	base_dir: PathBuf,
	project_root: String,
}

impl ProjectTree {
	/// A tree rooted at `base_dir/project_root`.
	pub fn new(base_dir: impl Into<PathBuf>, project_root: impl Into<String>) -> Self {
		ProjectTree {
			base_dir: base_dir.into(),
			project_root: project_root.into(),
		}
	}

	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Absolute (or base-relative) directory the search starts from.
	pub fn search_root(&self) -> PathBuf {
		self.base_dir.join(&self.project_root)
	}

	/// Every regular file under the search root, in file-name order.
	pub(crate) fn files(&self) -> impl Iterator<Item = walkdir::DirEntry> {
		WalkDir::new(self.search_root())
			.follow_links(false)
			.sort_by_file_name()
			.into_iter()
			.filter_map(std::result::Result::ok)
			.filter(|e| e.file_type().is_file())
	}
}

impl HeaderLocator for ProjectTree {
	fn project_root(&self) -> &str {
		&self.project_root
	}

	fn locate(&self, file_name: &str) -> Option<String> {
		let found = self
			.files()
			.filter(|e| e.file_name().to_str() == Some(file_name))
			.filter_map(|e| to_slash_relative(&self.base_dir, e.path()))
			.min_by(|a, b| compare_candidates(a, b));

		if found.is_none() {
			tracing::debug!(header = file_name, root = %self.search_root().display(), "header not found");
		}
		found
	}

	fn top_level_dirs(&self) -> Vec<String> {
		let entries = match std::fs::read_dir(self.search_root()) {
			Ok(entries) => entries,
			Err(e) => {
				tracing::debug!(root = %self.search_root().display(), error = %e, "project tree unreadable");
				return Vec::new();
			}
		};

		let mut dirs: Vec<String> = entries
			.filter_map(std::result::Result::ok)
			.filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
			.filter_map(|e| e.file_name().to_str().map(str::to_string))
			.collect();
		dirs.sort();
		dirs
	}
}
