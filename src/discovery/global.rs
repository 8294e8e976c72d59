use crate::rules::{PatternSet, RuleSet};
use crate::utils::paths::expand_tilde;
use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Pattern that excludes hidden files and directories.
pub const HIDDEN_PATTERN: &str = ".*";

/// Finds the user's global ignore file.
///
/// Lookup failures of any kind (tool missing, option unset, file absent) are
/// reported as `None`, never as errors.
pub trait GlobalIgnoreLocator {
    /// Path of the global ignore file, if there is one.
    fn locate(&self) -> Option<PathBuf>;
}

impl<F> GlobalIgnoreLocator for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn locate(&self) -> Option<PathBuf> {
        self()
    }
}

/// Locates the global ignore file the way git does: `core.excludesFile`,
/// falling back to `$XDG_CONFIG_HOME/git/ignore` or `~/.config/git/ignore`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitConfigLocator;

impl GlobalIgnoreLocator for GitConfigLocator {
    fn locate(&self) -> Option<PathBuf> {
        let path = configured_excludes_file().or_else(default_excludes_file)?;

        if path.is_file() {
            debug!(path = %path.display(), "Using global ignore file");
            Some(path)
        } else {
            debug!(path = %path.display(), "Global ignore file does not exist");
            None
        }
    }
}

/// Loads the global ignore file found by `locator`, if any.
#[must_use]
pub fn load_global_rules(locator: &dyn GlobalIgnoreLocator) -> Option<RuleSet> {
    let source = locator.locate()?;
    let lines = crate::discovery::read_lines(&source)?;

    Some(RuleSet::Global {
        source,
        rules: PatternSet::compile(lines),
    })
}

/// The rule set excluding hidden files and directories.
#[must_use]
pub fn hidden_rule_set() -> RuleSet {
    RuleSet::Hidden(PatternSet::compile([HIDDEN_PATTERN]))
}

fn configured_excludes_file() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["config", "--get", "core.excludesFile"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| debug!(error = %e, "Cannot run git to find the global ignore file"))
        .ok()?;

    // git exits with 1 when the key is unset
    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8_lossy(&output.stdout);
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Some(expand_tilde(value))
}

fn default_excludes_file() -> Option<PathBuf> {
    let config_home = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))?;

    Some(config_home.join("git").join("ignore"))
}
