#![warn(missing_docs)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # treewalk - Ignore-Aware File Discovery
//!
//! treewalk finds the files a source search tool should look at. Given some
//! starting paths it walks the tree below them and yields every file whose
//! name matches a glob, skipping whatever the user has asked to be ignored:
//!
//! - hidden files and directories
//! - `.gitignore`, `.ignore` and `.rgignore` files, each scoped to its own
//!   directory and found both above and below the starting point
//! - the global git excludes file (`core.excludesFile`)
//!
//! Symbolic links are never followed during traversal. A starting path the
//! user names explicitly is always searched, even if a rule would exclude
//! it.
//!
//! ## Architecture
//!
//! - [`rules`]: compiled ignore patterns, anchored or not
//! - [`discovery`]: locating ignore files and the global excludes file
//! - [`walk`]: the [`Walker`], per-directory contexts and the iterators
//! - [`search`]: turning user-supplied paths into [`FoundEntry`] values
//! - [`config`]: TOML configuration
//! - [`cli`] and [`output`]: the `treewalk` binary's interface
//! - [`utils`]: path helpers and the worker pool
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::PathBuf;
//! use treewalk::{FoundEntry, WalkOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = WalkOptions::default().glob("*.py");
//!
//! for entry in treewalk::files_to_search(&[PathBuf::from(".")], options)? {
//!     match entry {
//!         FoundEntry::File(path) => println!("{}", path.display()),
//!         FoundEntry::Missing(path) => eprintln!("{}: missing", path.display()),
//!         FoundEntry::Error(e) => eprintln!("{e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Configuration parsing, validation, and management.
pub mod config;

/// Ignore-file discovery and global rule acquisition.
pub mod discovery;

/// Output formatting and exit codes for the binary.
pub mod output;

/// Compiled ignore rule sets.
pub mod rules;

/// Top-level entry turning user paths into found files.
pub mod search;

/// Utility functions and helpers.
pub mod utils;

/// Directory traversal.
pub mod walk;

/// Test fixtures shared by unit tests.
mod test_utils;

pub use search::{FilesToSearch, FoundEntry, WalkError, files_to_search};
pub use walk::{Walk, WalkContext, WalkOptions, Walker};

/// Current version of the treewalk binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
