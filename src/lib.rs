//! Restyle - CLI tool for migrating C/C++ sources to a house style.
//!
//! This library provides the core functionality for restyle, including:
//! - Configuration file parsing and cascade discovery
//! - Text rewriting rules (identifiers, loops, comments, includes, guards)
//! - Header lookup over the project tree
//! - The ordered pipeline and in-place file migration
//!
//! # Example
//!
//! ```no_run
//! use restyle_cli::config::load_settings;
//! use restyle_cli::locate::HeaderIndex;
//! use restyle_cli::migrate::migrate_file;
//! use restyle_cli::pipeline::Pipeline;
//! use std::path::Path;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let settings = load_settings(&cwd).unwrap();
//! let index = HeaderIndex::build(&cwd, settings.project_root.clone());
//! let pipeline = Pipeline::new(&settings, &index);
//!
//! let report = migrate_file(Path::new("webrtc/video/codec.h"), &pipeline).unwrap();
//! for diagnostic in &report.diagnostics {
//!     println!("WARNING: {}", diagnostic);
//! }
//! ```

pub mod config;
pub mod error;
pub mod locate;
pub mod migrate;
pub mod pipeline;
pub mod rules;

pub use error::{RestyleError, Result};
