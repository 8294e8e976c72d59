use crate::discovery::{DOT_IGNORE_FILES, GITIGNORE};
use serde::{Deserialize, Serialize};

/// Default target glob.
pub const DEFAULT_GLOB: &str = "*.py";

/// Options controlling which files a walk yields.
///
/// Also used as the `[walk]` section of the configuration file, so every
/// field has a default and may be omitted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Glob matched against file names, e.g. `*.py`
    pub glob: String,
    /// Yield hidden files and descend into hidden directories
    pub include_hidden: bool,
    /// Honor the global excludes file (requires `respect_vcs_ignores`)
    pub respect_global_ignores: bool,
    /// Honor `.gitignore` files
    pub respect_vcs_ignores: bool,
    /// Honor `.ignore` and `.rgignore` files
    pub respect_dot_ignores: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            glob: DEFAULT_GLOB.to_string(),
            include_hidden: false,
            respect_global_ignores: true,
            respect_vcs_ignores: true,
            respect_dot_ignores: true,
        }
    }
}

impl WalkOptions {
    #[must_use]
    pub fn glob(mut self, glob: impl Into<String>) -> Self {
        self.glob = glob.into();
        self
    }

    #[must_use]
    pub const fn include_hidden(mut self, yes: bool) -> Self {
        self.include_hidden = yes;
        self
    }

    #[must_use]
    pub const fn respect_global_ignores(mut self, yes: bool) -> Self {
        self.respect_global_ignores = yes;
        self
    }

    #[must_use]
    pub const fn respect_vcs_ignores(mut self, yes: bool) -> Self {
        self.respect_vcs_ignores = yes;
        self
    }

    #[must_use]
    pub const fn respect_dot_ignores(mut self, yes: bool) -> Self {
        self.respect_dot_ignores = yes;
        self
    }

    /// Whether the global excludes file is consulted at all
    #[must_use]
    pub const fn uses_global_ignores(&self) -> bool {
        self.respect_global_ignores && self.respect_vcs_ignores
    }

    /// Names of the per-directory ignore files to look for
    #[must_use]
    pub const fn ignore_file_names(&self) -> &'static [&'static str] {
        const ALL: [&str; 3] = [GITIGNORE, DOT_IGNORE_FILES[0], DOT_IGNORE_FILES[1]];
        const VCS: [&str; 1] = [GITIGNORE];

        match (self.respect_vcs_ignores, self.respect_dot_ignores) {
            (true, true) => &ALL,
            (true, false) => &VCS,
            (false, true) => &DOT_IGNORE_FILES,
            (false, false) => &[],
        }
    }
}
