use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Compiled form of one ignore file's lines.
///
/// Matching follows gitignore semantics as implemented by the `ignore` crate:
/// `*` and `**` wildcards, trailing-`/` directory-only patterns, leading-`/`
/// anchoring and `!` negation resolved by the last matching line. A pattern
/// that matches a directory also covers everything beneath it.
///
/// The source lines are kept so a set can be recompiled with extra lines
/// (see [`PatternSet::with_line`]).
#[derive(Clone)]
pub struct PatternSet {
    /// Lines the set was compiled from, in order
    lines: Vec<String>,
    /// Compiled matcher
    compiled: Gitignore,
}

impl PatternSet {
    /// Compiles `lines` into a pattern set.
    ///
    /// Lines the compiler rejects are skipped with a debug log, so the result
    /// is never an error. Comments and blank lines are accepted and match
    /// nothing.
    pub fn compile<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let compiled = build(&lines);
        Self { lines, compiled }
    }

    /// A set with no patterns. Matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            compiled: Gitignore::empty(),
        }
    }

    /// Returns a copy of this set with `line` appended after every existing
    /// line, so it takes precedence under last-match-wins.
    #[must_use]
    pub fn with_line(&self, line: impl Into<String>) -> Self {
        let mut lines = self.lines.clone();
        lines.push(line.into());
        Self::compile(lines)
    }

    /// Does `path` (or any of its parent directories) match?
    ///
    /// `path` is interpreted relative to the set's owner. Absolute paths are
    /// matched on their normal components, with the root dropped.
    #[must_use]
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self.compiled.is_empty() {
            return false;
        }

        let relative = normal_components(path);
        if relative.as_os_str().is_empty() {
            return false;
        }

        self.compiled
            .matched_path_or_any_parents(&relative, is_dir)
            .is_ignore()
    }

    /// Source lines, in order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when no line compiled into a pattern
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
            .field("lines", &self.lines)
            .finish()
    }
}

/// Builds a gitignore line that re-includes exactly `relative` as a directory.
///
/// The line is anchored (`!/a/b/`) so it cannot affect a same-named directory
/// elsewhere, and glob metacharacters in the names are escaped.
#[must_use]
pub fn negated_dir_line(relative: &Path) -> Option<String> {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(escape_glob(&name.to_string_lossy())),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(format!("!/{}/", parts.join("/")))
}

fn build(lines: &[String]) -> Gitignore {
    let mut builder = GitignoreBuilder::new(".");
    for line in lines {
        if let Err(e) = builder.add_line(None, line) {
            debug!(line = %line, error = %e, "Skipping invalid ignore pattern");
        }
    }

    builder.build().unwrap_or_else(|e| {
        debug!(error = %e, "Failed to build ignore rules, using an empty set");
        Gitignore::empty()
    })
}

fn normal_components(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect()
}

fn escape_glob(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, '\\' | '*' | '?' | '[' | ']' | '{' | '}') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    // Trailing spaces are stripped by the gitignore parser unless escaped
    if escaped.ends_with(' ') {
        let trimmed = escaped.trim_end_matches(' ').len();
        let spaces = escaped.len() - trimmed;
        escaped.truncate(trimmed);
        for _ in 0..spaces {
            escaped.push_str("\\ ");
        }
    }

    escaped
}
