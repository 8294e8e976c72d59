//! Top-level entry: turns the paths a user typed into found files.
//!
//! Each path is handled on its own and in order. Files named explicitly are
//! reported as given, regardless of ignore rules; directories are walked;
//! anything else becomes a [`FoundEntry::Missing`] or [`FoundEntry::Error`]
//! so one bad path never stops the rest.

use crate::walk::{Walk, WalkOptions, Walker};
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;
use tracing::debug;

/// A failure reading part of the tree.
#[derive(Debug)]
pub struct WalkError {
    /// Path that could not be read
    pub path: PathBuf,
    /// Underlying I/O error
    pub source: io::Error,
}

impl WalkError {
    /// Wraps `source` as a failure reading `path`.
    #[must_use]
    pub const fn new(path: PathBuf, source: io::Error) -> Self {
        Self { path, source }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for WalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl PartialEq for WalkError {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.source.kind() == other.source.kind()
    }
}

/// One result of a search.
#[derive(Debug, PartialEq)]
pub enum FoundEntry {
    /// A file to search
    File(PathBuf),
    /// A starting path that does not exist
    Missing(PathBuf),
    /// A path that could not be read
    Error(WalkError),
}

impl FoundEntry {
    pub(crate) fn error(path: &Path, source: io::Error) -> Self {
        Self::Error(WalkError::new(path.to_path_buf(), source))
    }

    /// The file path, if this entry is a file.
    #[must_use]
    pub fn into_file(self) -> Option<PathBuf> {
        match self {
            Self::File(path) => Some(path),
            Self::Missing(_) | Self::Error(_) => None,
        }
    }

    /// Is this entry a file?
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// What a user-supplied starting path turned out to be.
pub(crate) enum StartingPath {
    Directory,
    File,
    Unusable(FoundEntry),
}

impl StartingPath {
    /// Stats `path`, resolved against `working_dir` when relative.
    ///
    /// Symbolic links given explicitly are followed.
    pub(crate) fn classify(path: &Path, working_dir: &Path) -> Self {
        match working_dir.join(path).metadata() {
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(_) => Self::File,
            Err(e) if is_missing(&e) => {
                debug!(path = %path.display(), "Starting path does not exist");
                Self::Unusable(FoundEntry::Missing(path.to_path_buf()))
            }
            Err(e) => Self::Unusable(FoundEntry::error(path, e)),
        }
    }
}

fn is_missing(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// Lazy sequence of [`FoundEntry`] values for a list of starting paths.
///
/// Created by [`Walker::files_to_search`] or [`files_to_search`].
#[derive(Debug)]
pub struct FilesToSearch {
    walker: Walker,
    working_dir: PathBuf,
    paths: vec::IntoIter<PathBuf>,
    current: Option<Walk>,
}

impl Iterator for FilesToSearch {
    type Item = FoundEntry;

    fn next(&mut self) -> Option<FoundEntry> {
        loop {
            if let Some(walk) = &mut self.current {
                if let Some(entry) = walk.next() {
                    return Some(entry);
                }
                self.current = None;
            }

            let path = self.paths.next()?;
            match StartingPath::classify(&path, &self.working_dir) {
                StartingPath::Directory => match self.walker.for_dir(&path, &self.working_dir) {
                    Ok(context) => self.current = Some(context.walk()),
                    Err(e) => return Some(FoundEntry::error(&path, e)),
                },
                StartingPath::File => return Some(FoundEntry::File(path)),
                StartingPath::Unusable(entry) => return Some(entry),
            }
        }
    }
}

impl Walker {
    /// Lazily finds the files to search under `paths`.
    ///
    /// Relative paths are resolved against `working_dir`, and found files
    /// below them are reported relative to it.
    #[must_use]
    pub fn files_to_search(&self, paths: &[PathBuf], working_dir: &Path) -> FilesToSearch {
        FilesToSearch {
            walker: self.clone(),
            working_dir: working_dir.to_path_buf(),
            paths: paths.to_vec().into_iter(),
            current: None,
        }
    }
}

/// Finds the files to search under `paths`, relative to the process's
/// current directory.
///
/// # Errors
///
/// Returns an error if the target glob is invalid or the current directory
/// cannot be determined.
pub fn files_to_search(paths: &[PathBuf], options: WalkOptions) -> Result<FilesToSearch> {
    let working_dir = env::current_dir().context("Failed to determine current directory")?;
    let walker = Walker::new(options)?;
    Ok(walker.files_to_search(paths, &working_dir))
}
