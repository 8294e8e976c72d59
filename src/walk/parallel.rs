use super::context::{WalkContext, Walker};
use super::iter::list_dir;
use crate::search::{FoundEntry, StartingPath};
use crate::utils::thread_pool::run_in_pool;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

impl WalkContext {
    /// Eagerly collects everything below this context's directory, walking
    /// sibling subdirectories on rayon workers.
    ///
    /// The result is in the same order [`WalkContext::walk`] would produce.
    #[must_use]
    pub fn collect_parallel(self) -> Vec<FoundEntry> {
        let listing = list_dir(&self);

        let mut found: Vec<FoundEntry> = listing
            .errors
            .into_iter()
            .map(|error| self.error_entry(error))
            .collect();

        found.extend(
            listing
                .files
                .iter()
                .filter(|file| !self.is_ignored(file, false))
                .map(|file| FoundEntry::File(self.output_path(file))),
        );

        let nested: Vec<Vec<FoundEntry>> = listing
            .subdirs
            .par_iter()
            .filter(|subdir| !self.is_ignored(subdir, true))
            .map(|subdir| self.for_subdir(subdir).collect_parallel())
            .collect();

        found.extend(nested.into_iter().flatten());
        found
    }
}

impl Walker {
    /// Parallel counterpart of [`Walker::files_to_search`].
    ///
    /// Runs inside the configured worker pool and returns once every path
    /// has been walked.
    #[must_use]
    pub fn collect_parallel(&self, paths: &[PathBuf], working_dir: &Path) -> Vec<FoundEntry> {
        let span = span!(Level::DEBUG, "collect_parallel", paths = paths.len());
        let _guard = span.enter();

        let found = run_in_pool(|| {
            paths
                .iter()
                .flat_map(|path| self.search_one(path, working_dir))
                .collect::<Vec<_>>()
        });

        debug!(entries = found.len(), "Parallel walk finished");
        found
    }

    fn search_one(&self, path: &Path, working_dir: &Path) -> Vec<FoundEntry> {
        match StartingPath::classify(path, working_dir) {
            StartingPath::Directory => match self.for_dir(path, working_dir) {
                Ok(context) => context.collect_parallel(),
                Err(e) => vec![FoundEntry::error(path, e)],
            },
            StartingPath::File => vec![FoundEntry::File(path.to_path_buf())],
            StartingPath::Unusable(entry) => vec![entry],
        }
    }
}
