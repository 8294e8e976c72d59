use super::context::WalkContext;
use crate::search::{FoundEntry, WalkError};
use std::io;
use std::path::PathBuf;
use std::vec;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// One directory level, split into what the walk acts on.
#[derive(Debug, Default)]
pub(crate) struct Listing {
    /// Regular files whose name matches the target glob
    pub files: Vec<PathBuf>,
    /// Subdirectories, not yet checked against the rules
    pub subdirs: Vec<PathBuf>,
    /// Failures reading the directory or one of its entries
    pub errors: Vec<WalkError>,
}

/// Reads the entries directly inside `context`'s directory.
///
/// Symbolic links are dropped here, before any rule is consulted, so they are
/// never yielded and never descended into. The directory handle is closed
/// before this returns.
pub(crate) fn list_dir(context: &WalkContext) -> Listing {
    let dir = context.current_dir();
    let mut listing = Listing::default();

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                debug!(path = %path.display(), error = %e, "Cannot read directory entry");
                let source = e.into_io_error().unwrap_or_else(|| {
                    io::Error::other(format!("cannot read {}", path.display()))
                });
                listing.errors.push(WalkError::new(path, source));
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            debug!(path = %entry.path().display(), "Ignoring symlink");
            continue;
        }

        if file_type.is_dir() {
            listing.subdirs.push(entry.into_path());
        } else if file_type.is_file() {
            let matched = entry
                .file_name()
                .to_str()
                .is_some_and(|name| context.matches_glob(name));
            if matched {
                listing.files.push(entry.into_path());
            } else {
                trace!(path = %entry.path().display(), "Name does not match glob");
            }
        }
    }

    listing
}

impl WalkContext {
    /// Reports a read failure, naming the path the way found files are named.
    pub(crate) fn error_entry(&self, error: WalkError) -> FoundEntry {
        FoundEntry::Error(WalkError::new(self.output_path(&error.path), error.source))
    }
}

/// Lazy, depth-first iterator over the files below a directory.
///
/// Each directory's matching files are yielded before its subdirectories are
/// entered. A directory is listed in full when it is entered, so no directory
/// handle is held between calls to `next` and dropping the iterator early
/// leaves nothing open.
#[derive(Debug)]
pub struct Walk {
    /// Directories being enumerated, innermost last
    stack: Vec<Level>,
}

#[derive(Debug)]
struct Level {
    context: WalkContext,
    files: vec::IntoIter<PathBuf>,
    subdirs: vec::IntoIter<PathBuf>,
    errors: vec::IntoIter<WalkError>,
}

impl Level {
    fn enter(context: WalkContext) -> Self {
        trace!(dir = %context.current_dir().display(), "Entering directory");
        let listing = list_dir(&context);

        Self {
            context,
            files: listing.files.into_iter(),
            subdirs: listing.subdirs.into_iter(),
            errors: listing.errors.into_iter(),
        }
    }
}

impl Walk {
    pub(crate) fn new(context: WalkContext) -> Self {
        Self {
            stack: vec![Level::enter(context)],
        }
    }
}

impl Iterator for Walk {
    type Item = FoundEntry;

    fn next(&mut self) -> Option<FoundEntry> {
        loop {
            let level = self.stack.last_mut()?;

            if let Some(error) = level.errors.next() {
                return Some(level.context.error_entry(error));
            }

            if let Some(file) = level.files.next() {
                if level.context.is_ignored(&file, false) {
                    continue;
                }
                return Some(FoundEntry::File(level.context.output_path(&file)));
            }

            if let Some(subdir) = level.subdirs.next() {
                if level.context.is_ignored(&subdir, true) {
                    continue;
                }
                let child = level.context.for_subdir(&subdir);
                self.stack.push(Level::enter(child));
                continue;
            }

            self.stack.pop();
        }
    }
}
