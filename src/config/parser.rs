use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads, parses and validates a configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, is not valid
/// TOML, or holds an invalid value.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // Validate UTF-8 using SIMD
    let content = simdutf8::basic::from_utf8(&bytes)
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in config file {}: {e}", path.display()))?;

    parse_config_str(content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parses and validates configuration text
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or holds an invalid value.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

/// Checks values that deserialize fine but cannot be used
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_glob(&config.walk.glob)?;

    if config.performance.threads == 0 {
        anyhow::bail!("Threads must be at least 1");
    }

    Ok(())
}

/// Checks that `glob` compiles as a target glob
///
/// # Errors
///
/// Returns an error describing why the pattern is invalid.
pub fn validate_glob(glob: &str) -> Result<()> {
    glob::Pattern::new(glob).with_context(|| format!("Invalid glob pattern: {glob}"))?;
    Ok(())
}
