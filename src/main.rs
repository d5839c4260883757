use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use restyle_cli::config::{CONFIG_FILE_NAME, Settings, generate_init_template, load_settings};
use restyle_cli::locate::HeaderIndex;
use restyle_cli::migrate::migrate_file;
use restyle_cli::pipeline::{Pipeline, Stage};

#[derive(Parser)]
#[command(name = "restyle")]
#[command(
	author,
	version,
	about = "CLI tool for migrating C/C++ sources from a legacy code style to a house style"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Directory holding the project tree (defaults to the current directory)
	#[arg(long, value_name = "DIR")]
	base_dir: Option<PathBuf>,

	/// Create a template .restyle.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .restyle.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Display the effective configuration with its source files
	#[arg(long)]
	show_config: bool,

	/// Log every stage to stderr
	#[arg(short, long)]
	verbose: bool,

	/// Files to rewrite in place
	#[arg(value_name = "FILE")]
	files: Vec<PathBuf>,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	// RUST_LOG overrides; --verbose => debug; else warnings only
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(if verbose {
			"restyle_cli=debug,restyle=debug"
		} else {
			"restyle_cli=warn,restyle=warn"
		})
	});
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let settings = load_settings(&cwd).context("Failed to load configuration")?;

	if cli.show_config {
		return handle_show_config(&settings);
	}

	if cli.files.is_empty() {
		Cli::command()
			.error(ErrorKind::MissingRequiredArgument, "no input files given")
			.exit();
	}

	let base_dir = cli.base_dir.unwrap_or(cwd);
	handle_files(&cli.files, &base_dir, &settings)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", CONFIG_FILE_NAME);
	Ok(ExitCode::SUCCESS)
}

fn handle_show_config(settings: &Settings) -> Result<ExitCode> {
	if settings.sources.is_empty() {
		println!("No configuration files found, using defaults.\n");
	} else {
		println!("Configuration files (in cascade order):");
		for source in &settings.sources {
			println!("  {}", source.display());
		}
		println!();
	}

	println!("project-root: {}", settings.project_root);
	println!("guard-prefix: {}", settings.guard_prefix());
	println!("preserved-lines: {}", settings.preserved_lines);
	println!("header-extension: {}", settings.header_extension);

	let stages: Vec<String> = Stage::SOURCE_PASS
		.iter()
		.chain(Stage::GUARD_PASS.iter())
		.map(|stage| {
			let state = if settings.is_enabled(*stage) { "on" } else { "off" };
			format!("  {} ({})", stage, state)
		})
		.collect();
	println!("stages:\n{}", stages.join("\n"));

	Ok(ExitCode::SUCCESS)
}

fn handle_files(files: &[PathBuf], base_dir: &Path, settings: &Settings) -> Result<ExitCode> {
	let index = HeaderIndex::build(base_dir, settings.project_root.clone());
	let pipeline = Pipeline::new(settings, &index);

	for file in files {
		match migrate_file(file, &pipeline) {
			Ok(report) => {
				for diagnostic in &report.diagnostics {
					println!("WARNING: {}", diagnostic);
				}
				println!("{} done.", file.display());
			}
			// A file that can't be read or written doesn't stop the batch
			Err(e) => {
				eprintln!("Warning: skipping {}: {:#}", file.display(), anyhow::Error::new(e));
			}
		}
	}

	Ok(ExitCode::SUCCESS)
}
