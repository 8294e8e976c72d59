//! Configuration file handling.
//!
//! Values come from a TOML file; command-line flags override them.

/// TOML parsing and validation.
pub mod parser;

use crate::utils::thread_pool::default_threads;
use crate::walk::WalkOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "TREEWALK_CONFIG_PATH";

/// Configuration file path relative to the user's config directory.
pub const DEFAULT_CONFIG_PATH: &str = "treewalk/config.toml";

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Which files a walk yields
    #[serde(default)]
    pub walk: WalkOptions,

    /// Threading
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// The `[performance]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Fan subdirectories out over worker threads
    #[serde(default)]
    pub parallel: bool,
    /// Worker threads for parallel walks
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: default_threads(),
        }
    }
}

impl Config {
    /// Location of the configuration file: `$TREEWALK_CONFIG_PATH` if set,
    /// otherwise `treewalk/config.toml` under the user's config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither is available.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(config_dir.join(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let (section, name) = key.split_once('.')?;

        match (section, name) {
            ("walk", "glob") => Some(self.walk.glob.clone()),
            ("walk", "include_hidden") => Some(self.walk.include_hidden.to_string()),
            ("walk", "respect_global_ignores") => {
                Some(self.walk.respect_global_ignores.to_string())
            }
            ("walk", "respect_vcs_ignores") => Some(self.walk.respect_vcs_ignores.to_string()),
            ("walk", "respect_dot_ignores") => Some(self.walk.respect_dot_ignores.to_string()),
            ("performance", "parallel") => Some(self.performance.parallel.to_string()),
            ("performance", "threads") => Some(self.performance.threads.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let Some((section, name)) = key.split_once('.') else {
            anyhow::bail!("Invalid configuration key: {key}");
        };

        match (section, name) {
            ("walk", "glob") => {
                parser::validate_glob(value)?;
                self.walk.glob = value.to_string();
            }
            ("walk", "include_hidden") => self.walk.include_hidden = parse_bool(value)?,
            ("walk", "respect_global_ignores") => {
                self.walk.respect_global_ignores = parse_bool(value)?;
            }
            ("walk", "respect_vcs_ignores") => self.walk.respect_vcs_ignores = parse_bool(value)?,
            ("walk", "respect_dot_ignores") => self.walk.respect_dot_ignores = parse_bool(value)?,
            ("performance", "parallel") => self.performance.parallel = parse_bool(value)?,
            ("performance", "threads") => {
                let threads: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if threads == 0 {
                    anyhow::bail!("Threads must be at least 1");
                }
                self.performance.threads = threads;
            }
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }
        Ok(())
    }

    /// Every key accepted by [`Config::get`] and [`Config::set`]
    #[must_use]
    pub const fn keys() -> &'static [&'static str] {
        &[
            "walk.glob",
            "walk.include_hidden",
            "walk.respect_global_ignores",
            "walk.respect_vcs_ignores",
            "walk.respect_dot_ignores",
            "performance.parallel",
            "performance.threads",
        ]
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .parse()
        .with_context(|| format!("Invalid boolean: {value}"))
}
