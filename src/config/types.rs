use crate::error::RestyleError;
use crate::pipeline::Stage;
use serde::Deserialize;
use std::path::PathBuf;

/// Project tree directory name used when no config sets one.
pub const DEFAULT_PROJECT_ROOT: &str = "webrtc";

/// Number of leading lines the comment converter never touches.
pub const DEFAULT_PRESERVED_LINES: usize = 10;

/// Extension of files that get the include-guard pass.
pub const DEFAULT_HEADER_EXTENSION: &str = "h";

/// Top-level configuration from a `.restyle.toml` file.
///
/// Every setting is optional so that files in the cascade can be layered;
/// the nearest file that sets a key wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop the directory cascade at this file.
	#[serde(default)]
	pub root: bool,

	/// Name of the directory holding the project tree, relative to the base directory.
	pub project_root: Option<String>,

	/// Prefix of canonical include guards. Defaults to the project root uppercased plus `_`.
	pub guard_prefix: Option<String>,

	/// Lines at the top of each file (the license block) left verbatim by the comment converter.
	pub preserved_lines: Option<usize>,

	/// Extension marking header files, without the leading dot.
	pub header_extension: Option<String>,

	/// Stages to disable.
	#[serde(default)]
	pub skip: Vec<Stage>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
	pub project_root: String,

	pub guard_prefix: Option<String>,

	pub preserved_lines: usize,

	pub header_extension: String,

	pub skip: Vec<Stage>,

	/// Config files that contributed, nearest first.
	pub sources: Vec<PathBuf>,
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			project_root: DEFAULT_PROJECT_ROOT.to_string(),
			guard_prefix: None,
			preserved_lines: DEFAULT_PRESERVED_LINES,
			header_extension: DEFAULT_HEADER_EXTENSION.to_string(),
			skip: Vec::new(),
			sources: Vec::new(),
		}
	}
}

impl Settings {
	/// Prefix for canonical guard tokens, e.g. `WEBRTC_`.
	pub fn guard_prefix(&self) -> String {
		match self.guard_prefix {
			Some(ref prefix) => prefix.clone(),
			None => format!("{}_", self.project_root.to_uppercase()),
		}
	}

	/// Whether a stage runs under these settings.
	pub fn is_enabled(&self, stage: Stage) -> bool {
		!self.skip.contains(&stage)
	}
}

impl Config {
	/// Validate values that serde accepts but the pipeline cannot use.
	pub fn validate(&self) -> Result<(), RestyleError> {
		if let Some(ref root) = self.project_root
			&& (root.is_empty()
				|| root == "."
				|| root == ".."
				|| root.contains(['/', '\\']))
		{
			return Err(RestyleError::InvalidConfigValue {
				key: "project-root".to_string(),
				reason: format!("'{}' is not a single directory name", root),
			});
		}

		if let Some(ref ext) = self.header_extension
			&& ext.trim_start_matches('.').is_empty()
		{
			return Err(RestyleError::InvalidConfigValue {
				key: "header-extension".to_string(),
				reason: "must not be empty".to_string(),
			});
		}

		Ok(())
	}
}
