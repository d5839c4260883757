use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, Settings};
use crate::error::{Result, RestyleError};
use std::path::{Path, PathBuf};

/// File name looked up in every directory of the cascade.
pub const CONFIG_FILE_NAME: &str = ".restyle.toml";

/// Environment variable that, if truthy, skips the `~/.restyle.toml` lookup.
pub const NO_USER_CONFIG_ENV_VAR: &str = "RESTYLE_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.restyle.toml`
/// 2. Continue up the directory tree until a file with `root = true`
/// 3. Finally, check ~/.restyle.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		let config_path = current_dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			let stop = config.root;

			tracing::debug!(path = %config_path.display(), "loaded config");
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		if let Some(parent) = current_dir.parent() {
			current_dir = parent.to_path_buf();
		} else {
			break;
		}
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.restyle.toml if it exists, isn't disabled and wasn't
/// already picked up by the directory walk.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	if is_env_truthy(NO_USER_CONFIG_ENV_VAR) {
		return Ok(None);
	}

	let user_config_path = user_config_path()?;

	if existing_configs.iter().any(|c| c.path == user_config_path) {
		return Ok(None);
	}

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs over the defaults.
///
/// For each key the first config (the most specific) that sets it wins.
/// `skip` lists accumulate across the whole cascade.
pub fn merge_configs(configs: &[LoadedConfig]) -> Settings {
	let mut settings = Settings::default();

	for loaded in configs.iter().rev() {
		let config = &loaded.config;

		if let Some(ref root) = config.project_root {
			settings.project_root = root.clone();
		}
		if let Some(ref prefix) = config.guard_prefix {
			settings.guard_prefix = Some(prefix.clone());
		}
		if let Some(lines) = config.preserved_lines {
			settings.preserved_lines = lines;
		}
		if let Some(ref ext) = config.header_extension {
			settings.header_extension = ext.trim_start_matches('.').to_string();
		}
		for stage in &config.skip {
			if !settings.skip.contains(stage) {
				settings.skip.push(*stage);
			}
		}
	}

	settings.sources = configs.iter().map(|c| c.path.clone()).collect();
	settings
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_settings(start_dir: &Path) -> Result<Settings> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(RestyleError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
