//! Ignore-file discovery.
//!
//! Finds the ignore files that apply to a directory, either by walking up to
//! the repository boundary ([`find_upward`]) when a walk starts, or by
//! checking a single directory ([`find_in_dir`]) as the walk descends.
//!
//! Probing is tolerant: a level that cannot be inspected (permission denied,
//! vanished directory) contributes nothing and discovery carries on.

/// Global excludes file and hidden-file rule.
pub mod global;

use crate::rules::{AnchoredPatternSet, PatternSet, RuleSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span, trace};

/// Version-control ignore file name.
pub const GITIGNORE: &str = ".gitignore";

/// Tool-specific ignore file names, honored like `.gitignore`.
pub const DOT_IGNORE_FILES: [&str; 2] = [".ignore", ".rgignore"];

/// Entries whose presence marks a repository root.
pub const BOUNDARY_MARKERS: [&str; 1] = [".git"];

/// Is `dir` the root of a repository?
///
/// `.git` may be a directory or a file (worktrees and submodules).
#[must_use]
pub fn is_boundary(dir: &Path) -> bool {
    BOUNDARY_MARKERS.iter().any(|marker| {
        let candidate = dir.join(marker);
        candidate.try_exists().unwrap_or_else(|e| {
            debug!(path = %candidate.display(), error = %e, "Cannot check for repository marker");
            false
        })
    })
}

/// Returns the ignore files named in `names` that exist directly inside
/// `dir`, in `names` order.
#[must_use]
pub fn find_in_dir(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for name in names {
        let candidate = dir.join(name);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => {
                trace!(path = %candidate.display(), "Found ignore file");
                found.push(candidate);
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                // Usually an unreadable directory
                debug!(path = %candidate.display(), error = %e, "Ignoring unreadable ignore file location");
            }
        }
    }

    found
}

/// Returns the ignore files that apply to `dir` from above: those in `dir`
/// and each ancestor, up to and including the first repository boundary or
/// the filesystem root.
///
/// The result is ordered root-to-leaf, and by `names` order within a level.
#[must_use]
pub fn find_upward(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    let span = span!(Level::DEBUG, "find_upward", dir = %dir.display());
    let _guard = span.enter();

    let start = dir.canonicalize().unwrap_or_else(|e| {
        debug!(error = %e, "Cannot resolve directory, searching from it as given");
        dir.to_path_buf()
    });

    let mut levels = Vec::new();
    let mut current = start.as_path();
    loop {
        levels.push(find_in_dir(current, names));

        if is_boundary(current) {
            debug!(boundary = %current.display(), "Reached repository boundary");
            break;
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break,
        }
    }

    levels.into_iter().rev().flatten().collect()
}

/// Loads one ignore file as a rule set anchored at its directory.
///
/// An unreadable file yields an empty set.
#[must_use]
pub fn load_ignore_file(path: &Path) -> RuleSet {
    let anchor = path
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

    let rules = read_lines(path).map_or_else(PatternSet::empty, PatternSet::compile);

    RuleSet::Local {
        source: path.to_path_buf(),
        rules: AnchoredPatternSet::new(anchor, rules),
    }
}

/// Reads an ignore file into lines. Invalid UTF-8 is replaced rather than
/// rejected, so one bad byte does not discard the whole file.
pub(crate) fn read_lines(path: &Path) -> Option<Vec<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Ignoring unreadable ignore file");
            return None;
        }
    };

    let content = match simdutf8::basic::from_utf8(&bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
    };

    Some(content.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        (temp, root)
    }

    #[test]
    fn test_is_boundary() {
        let (_temp, root) = repo();
        fs::create_dir(root.join("sub")).unwrap();

        assert!(is_boundary(&root));
        assert!(!is_boundary(&root.join("sub")));
    }

    #[test]
    fn test_git_file_is_boundary() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".git"), "gitdir: ../.git/worktrees/x").unwrap();

        assert!(is_boundary(temp.path()));
    }

    #[test]
    fn test_find_in_dir() {
        let (_temp, root) = repo();
        fs::write(root.join(GITIGNORE), "*.log").unwrap();
        fs::write(root.join(".rgignore"), "build").unwrap();

        let found = find_in_dir(&root, &[GITIGNORE, ".ignore", ".rgignore"]);
        assert_eq!(found, vec![root.join(GITIGNORE), root.join(".rgignore")]);

        assert!(find_in_dir(&root, &[".ignore"]).is_empty());
    }

    #[test]
    fn test_find_in_dir_skips_directories() {
        let (_temp, root) = repo();
        fs::create_dir(root.join(GITIGNORE)).unwrap();

        assert!(find_in_dir(&root, &[GITIGNORE]).is_empty());
    }

    #[test]
    fn test_find_upward_root_to_leaf() {
        let (_temp, root) = repo();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join(GITIGNORE), "").unwrap();
        fs::write(root.join("a").join(GITIGNORE), "").unwrap();
        fs::write(nested.join(GITIGNORE), "").unwrap();

        let found = find_upward(&nested, &[GITIGNORE]);
        assert_eq!(
            found,
            vec![
                root.join(GITIGNORE),
                root.join("a").join(GITIGNORE),
                nested.join(GITIGNORE),
            ]
        );
    }

    #[test]
    fn test_find_upward_stops_at_boundary() {
        let (_temp, root) = repo();
        let inner = root.join("vendored");
        fs::create_dir_all(inner.join(".git")).unwrap();
        fs::write(root.join(GITIGNORE), "outer").unwrap();
        fs::write(inner.join(GITIGNORE), "inner").unwrap();

        let found = find_upward(&inner, &[GITIGNORE]);
        assert_eq!(found, vec![inner.join(GITIGNORE)]);
    }

    #[test]
    fn test_find_upward_relative_start() {
        let (_temp, root) = repo();
        fs::write(root.join(GITIGNORE), "").unwrap();

        let found = find_upward(&root.join("."), &[GITIGNORE]);
        assert_eq!(found, vec![root.join(GITIGNORE)]);
    }

    #[test]
    fn test_load_ignore_file_is_anchored() {
        let (_temp, root) = repo();
        fs::create_dir(root.join("sub")).unwrap();
        let file = root.join("sub").join(GITIGNORE);
        fs::write(&file, "/only_here\n").unwrap();

        let set = load_ignore_file(&file);
        assert!(set.matches(&root.join("sub/only_here"), false));
        assert!(!set.matches(&root.join("sub/deeper/only_here"), false));
        assert!(!set.matches(&root.join("only_here"), false));
    }

    #[test]
    fn test_load_ignore_file_with_invalid_utf8() {
        let (_temp, root) = repo();
        let file = root.join(GITIGNORE);
        fs::write(&file, b"\xff\xfe\n*.tmp\n").unwrap();

        let set = load_ignore_file(&file);
        assert!(set.matches(&root.join("x.tmp"), false));
    }

    #[test]
    fn test_load_missing_ignore_file_is_empty() {
        let (_temp, root) = repo();
        let set = load_ignore_file(&root.join(GITIGNORE));

        assert!(!set.matches(&root.join("anything"), false));
    }
}
