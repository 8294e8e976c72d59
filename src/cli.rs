//! Command-line interface definitions for treewalk.
//!
//! The CLI definition is shared between the main binary and build tools (like
//! xtask) for man page generation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use crate::config::Config;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for treewalk.
#[derive(Parser, Debug)]
#[command(
    name = "treewalk",
    version = crate::VERSION,
    about = "List the files a search would look at",
    long_about = "Walks the given paths and lists the files matching a glob, honoring \
                  hidden-file rules, .gitignore/.ignore/.rgignore files and the global \
                  git excludes file"
)]
pub struct Cli {
    /// Files or directories to search
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Glob matched against file names [default: *.py]
    #[arg(short, long)]
    pub glob: Option<String>,

    /// Include hidden files and directories
    #[arg(short = '.', long)]
    pub hidden: bool,

    /// Don't use the global git excludes file
    #[arg(long)]
    pub no_ignore_global: bool,

    /// Don't use .gitignore files (or the global excludes file)
    #[arg(long)]
    pub no_ignore_vcs: bool,

    /// Don't use .ignore or .rgignore files
    #[arg(long)]
    pub no_ignore_dot: bool,

    /// Print nothing; exit 0 as soon as a file is found
    #[arg(short, long)]
    pub quiet: bool,

    /// Separate paths with NUL instead of newline
    #[arg(short = '0', long)]
    pub null: bool,

    /// Walk subdirectories on several threads
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads for --parallel
    #[arg(short = 'j', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub threads: Option<usize>,

    /// Configuration file to use
    #[arg(long, env = "TREEWALK_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log why paths are skipped
    #[arg(long)]
    pub debug: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completion: Option<Shell>,
}

impl Cli {
    /// Overrides configuration values with the flags given on the command
    /// line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(glob) = &self.glob {
            config.walk.glob.clone_from(glob);
        }
        if self.hidden {
            config.walk.include_hidden = true;
        }
        if self.no_ignore_global {
            config.walk.respect_global_ignores = false;
        }
        if self.no_ignore_vcs {
            config.walk.respect_vcs_ignores = false;
        }
        if self.no_ignore_dot {
            config.walk.respect_dot_ignores = false;
        }
        if self.parallel {
            config.performance.parallel = true;
        }
        if let Some(threads) = self.threads {
            config.performance.threads = threads;
        }
    }
}
