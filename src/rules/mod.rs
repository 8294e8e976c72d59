//! Ignore rule sets.
//!
//! A walk carries an ordered list of [`RuleSet`]s. A path is excluded when
//! **any** of them matches it. Each set resolves its own `!` negations
//! internally; there is no negation across sets, so a whitelist line in one
//! ignore file never re-includes a path excluded by another file or by the
//! hidden-file rule.

/// Pattern set anchored at the directory owning its ignore file.
pub mod anchored;
/// Adapter over the `ignore` crate's gitignore matcher.
pub mod pattern_set;

pub use anchored::AnchoredPatternSet;
pub use pattern_set::PatternSet;

use std::fmt;
use std::path::{Path, PathBuf};

/// One source of ignore rules.
#[derive(Debug, Clone)]
pub enum RuleSet {
    /// Rules from the global excludes file, matched against the full path.
    Global {
        /// The excludes file the rules were read from
        source: PathBuf,
        /// Compiled rules
        rules: PatternSet,
    },
    /// The "base name starts with a dot" rule.
    Hidden(PatternSet),
    /// Rules from one ignore file, matched relative to its directory.
    Local {
        /// The ignore file the rules were read from
        source: PathBuf,
        /// Compiled rules, anchored at the file's directory
        rules: AnchoredPatternSet,
    },
}

impl RuleSet {
    /// Does this set exclude `path`?
    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        match self {
            Self::Global { rules, .. } | Self::Hidden(rules) => rules.matches(path, is_dir),
            Self::Local { rules, .. } => rules.matches(path, is_dir),
        }
    }

    /// Returns a copy of this set that no longer excludes `dir` itself, or
    /// `None` if this set does not exclude `dir` in the first place.
    ///
    /// Used for directories the user names explicitly: inherited rules must
    /// not hide them, but whatever lies inside stays subject to every rule.
    #[must_use]
    pub fn exempting(&self, dir: &Path) -> Option<Self> {
        if !self.matches(dir, true) {
            return None;
        }

        match self {
            Self::Global { source, rules } => {
                let line = pattern_set::negated_dir_line(dir)?;
                Some(Self::Global {
                    source: source.clone(),
                    rules: rules.with_line(line),
                })
            }
            Self::Hidden(rules) => {
                let line = pattern_set::negated_dir_line(dir)?;
                Some(Self::Hidden(rules.with_line(line)))
            }
            Self::Local { source, rules } => Some(Self::Local {
                source: source.clone(),
                rules: rules.exempting(dir)?,
            }),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global { source, .. } => write!(f, "global ignore {}", source.display()),
            Self::Hidden(_) => f.write_str("hidden files"),
            Self::Local { source, .. } => write!(f, "{}", source.display()),
        }
    }
}
