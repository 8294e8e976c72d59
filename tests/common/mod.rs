#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treewalk::{FoundEntry, WalkOptions, Walker};

/// Scratch directory tree rooted at a fake repository
///
/// The root holds a `.git` directory so ignore-file discovery stops there.
pub struct TestTree {
    pub temp_dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Create an empty tree
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        fs::create_dir(root.join(".git")).expect("Failed to create .git");
        Self { temp_dir, root }
    }

    /// Create a tree from `(path, contents)` pairs
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let tree = Self::new();
        for (path, contents) in files {
            tree.file(path, contents);
        }
        tree
    }

    /// The tree's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file, creating parent directories
    pub fn file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Create a directory
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    /// Create a symlink at `link` pointing to `target`
    #[cfg(unix)]
    pub fn symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.path(link);
        std::os::unix::fs::symlink(self.path(target), &link_path)
            .expect("Failed to create symlink");
        link_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A walker that never consults the user's real global excludes file
pub fn walker(options: WalkOptions) -> Walker {
    Walker::with_locator(options, &|| -> Option<PathBuf> { None })
        .expect("Failed to create walker")
}

/// Everything found under `paths`, relative to `working_dir`
pub fn search(walker: &Walker, paths: &[&str], working_dir: &Path) -> Vec<FoundEntry> {
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    walker.files_to_search(&paths, working_dir).collect()
}

/// The set of files found under the tree root with `options`
pub fn found_files(tree: &TestTree, options: WalkOptions) -> BTreeSet<PathBuf> {
    search(&walker(options), &["."], tree.root())
        .into_iter()
        .filter_map(FoundEntry::into_file)
        .collect()
}

/// Build a path set from string literals
pub fn paths(items: &[&str]) -> BTreeSet<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}
