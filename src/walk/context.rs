use super::iter::Walk;
use super::options::WalkOptions;
use crate::discovery::global::{self, GitConfigLocator, GlobalIgnoreLocator};
use crate::discovery::{find_in_dir, find_upward, load_ignore_file};
use crate::rules::RuleSet;
use crate::utils::paths::relative_to;
use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, debug, span};

/// File-name matching for the target glob. Unlike shell globbing, `*` also
/// matches names with a leading dot; hidden files are handled by rules.
const GLOB_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Entry point for walks.
///
/// Holds the compiled target glob and the rule sets that apply everywhere
/// (global excludes, hidden files). These are loaded once and shared by every
/// starting directory.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Compiled target glob
    glob: Arc<Pattern>,
    /// Global and hidden rule sets, in that order
    seed: Vec<Arc<RuleSet>>,
    /// Options the walker was built from
    options: WalkOptions,
}

impl Walker {
    /// Creates a walker, locating the global ignore file through git.
    ///
    /// # Errors
    ///
    /// Returns an error if the target glob is invalid.
    pub fn new(options: WalkOptions) -> Result<Self> {
        Self::with_locator(options, &GitConfigLocator)
    }

    /// Creates a walker using `locator` to find the global ignore file.
    ///
    /// # Errors
    ///
    /// Returns an error if the target glob is invalid.
    pub fn with_locator(options: WalkOptions, locator: &dyn GlobalIgnoreLocator) -> Result<Self> {
        let glob = Pattern::new(&options.glob)
            .with_context(|| format!("Invalid glob pattern: {}", options.glob))?;

        let mut seed = Vec::new();
        if options.uses_global_ignores()
            && let Some(rules) = global::load_global_rules(locator)
        {
            seed.push(Arc::new(rules));
        }
        if !options.include_hidden {
            seed.push(Arc::new(global::hidden_rule_set()));
        }

        Ok(Self {
            glob: Arc::new(glob),
            seed,
            options,
        })
    }

    /// Options the walker was built with.
    #[must_use]
    pub const fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Builds the context for walking `directory`, a starting directory the
    /// user asked for.
    ///
    /// Ignore files are collected from `directory` up to the repository
    /// boundary. Any rule set that would exclude `directory` itself is
    /// amended so it no longer does: an explicitly requested directory is
    /// always searched, while its contents remain subject to every rule.
    ///
    /// A relative `directory` is resolved against `working_dir`. Output paths
    /// are absolute when `directory` is, and otherwise relative to
    /// `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `directory` cannot be resolved.
    pub fn for_dir(&self, directory: &Path, working_dir: &Path) -> io::Result<WalkContext> {
        let span = span!(Level::DEBUG, "for_dir", directory = %directory.display());
        let _guard = span.enter();

        // Relative directories are taken relative to `working_dir`
        let current_dir = working_dir.join(directory).canonicalize()?;
        let working_dir = working_dir
            .canonicalize()
            .unwrap_or_else(|_| working_dir.to_path_buf());

        let mut active_sets = self.seed.clone();
        let names = self.options.ignore_file_names();
        active_sets.extend(
            find_upward(&current_dir, names)
                .iter()
                .map(|path| Arc::new(load_ignore_file(path))),
        );

        let active_sets = active_sets
            .into_iter()
            .map(|set| match set.exempting(&current_dir) {
                Some(exempt) => {
                    debug!(rules = %set, "Exempting explicitly requested directory");
                    Arc::new(exempt)
                }
                None => set,
            })
            .collect();

        Ok(WalkContext {
            glob: Arc::clone(&self.glob),
            active_sets,
            current_dir,
            working_dir,
            absolute_output: directory.is_absolute(),
            ignore_file_names: names,
        })
    }
}

/// Everything needed to enumerate one directory.
///
/// Immutable: descending into a subdirectory derives a new context that
/// shares the parent's rule sets and adds the subdirectory's own ignore
/// files. Contexts can only be created by [`Walker::for_dir`] and
/// [`WalkContext::for_subdir`].
#[derive(Debug, Clone)]
pub struct WalkContext {
    /// Target glob, matched against file names
    glob: Arc<Pattern>,
    /// Rule sets in effect, outermost first
    active_sets: Vec<Arc<RuleSet>>,
    /// Absolute, canonical directory this context enumerates
    current_dir: PathBuf,
    /// Base for relative output paths
    working_dir: PathBuf,
    /// Yield absolute paths instead of paths relative to `working_dir`
    absolute_output: bool,
    /// Ignore file names looked for in each directory
    ignore_file_names: &'static [&'static str],
}

impl WalkContext {
    /// Derives the context for `subdirectory`, a direct child of this
    /// context's directory.
    ///
    /// Only `subdirectory` itself is checked for ignore files; its ancestors
    /// are already covered by this context.
    #[must_use]
    pub fn for_subdir(&self, subdirectory: &Path) -> Self {
        debug_assert_eq!(
            subdirectory.parent(),
            Some(self.current_dir.as_path()),
            "for_subdir called with a path that is not a child of the current directory"
        );

        let mut active_sets = self.active_sets.clone();
        active_sets.extend(
            find_in_dir(subdirectory, self.ignore_file_names)
                .iter()
                .map(|path| Arc::new(load_ignore_file(path))),
        );

        Self {
            glob: Arc::clone(&self.glob),
            active_sets,
            current_dir: subdirectory.to_path_buf(),
            working_dir: self.working_dir.clone(),
            absolute_output: self.absolute_output,
            ignore_file_names: self.ignore_file_names,
        }
    }

    /// Lazily enumerates the files below this context's directory.
    #[must_use]
    pub fn walk(self) -> Walk {
        Walk::new(self)
    }

    /// Is `path` excluded by any of the active rule sets?
    #[must_use]
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        match self.active_sets.iter().find(|set| set.matches(path, is_dir)) {
            Some(set) => {
                debug!(path = %path.display(), rules = %set, "Ignoring path because it matches ignore rules");
                true
            }
            None => false,
        }
    }

    /// Does `name` match the target glob?
    #[must_use]
    pub fn matches_glob(&self, name: &str) -> bool {
        self.glob.matches_with(name, GLOB_MATCH_OPTIONS)
    }

    /// Converts a found file's absolute path into the form reported to the
    /// caller.
    #[must_use]
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if self.absolute_output {
            path.to_path_buf()
        } else {
            relative_to(path, &self.working_dir)
        }
    }

    /// The directory this context enumerates.
    #[must_use]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Rule sets in effect, outermost first.
    #[must_use]
    pub fn active_sets(&self) -> &[Arc<RuleSet>] {
        &self.active_sets
    }
}
