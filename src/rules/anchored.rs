use super::pattern_set::{PatternSet, negated_dir_line};
use std::path::{Path, PathBuf};

/// A [`PatternSet`] tied to the directory that owns it.
///
/// Paths are rewritten relative to the anchor before matching, so a
/// `/pattern` line only matches directly inside the anchor. Paths outside the
/// anchor, and the anchor itself, never match.
#[derive(Debug, Clone)]
pub struct AnchoredPatternSet {
    /// Directory holding the ignore file
    anchor: PathBuf,
    /// Rules compiled from the ignore file
    rules: PatternSet,
}

impl AnchoredPatternSet {
    /// Creates a new anchored set.
    #[must_use]
    pub const fn new(anchor: PathBuf, rules: PatternSet) -> Self {
        Self { anchor, rules }
    }

    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        match path.strip_prefix(&self.anchor) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                self.rules.matches(relative, is_dir)
            }
            _ => false,
        }
    }

    /// Returns a copy that never excludes `dir` by way of its own or its
    /// parents' patterns. Descendants of `dir` are still matched normally.
    ///
    /// Returns `None` when `dir` is not below the anchor.
    #[must_use]
    pub fn exempting(&self, dir: &Path) -> Option<Self> {
        let relative = dir.strip_prefix(&self.anchor).ok()?;
        let line = negated_dir_line(relative)?;

        Some(Self {
            anchor: self.anchor.clone(),
            rules: self.rules.with_line(line),
        })
    }

    #[must_use]
    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    #[must_use]
    pub const fn rules(&self) -> &PatternSet {
        &self.rules
    }
}
