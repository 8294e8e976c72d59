//! Output for the treewalk binary.
//!
//! Found paths go to stdout, one per record, newline or NUL terminated.
//! Missing paths and read failures go to stderr in bold red. The
//! [`Reporter`] also tracks what it has seen so the binary can pick its exit
//! code.

use crate::search::FoundEntry;
use colored::Colorize;
use std::io::{self, Write};
use std::ops::ControlFlow;

/// Exit status: at least one file was found.
pub const EXIT_FOUND: i32 = 0;
/// Exit status: nothing was found.
pub const EXIT_NOT_FOUND: i32 = 1;
/// Exit status: a path was missing or could not be read.
pub const EXIT_ERROR: i32 = 2;

/// Prints an error message in bold red (always shown).
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// The stderr line for an entry that is not a file.
#[must_use]
pub fn describe_failure(entry: &FoundEntry) -> Option<String> {
    match entry {
        FoundEntry::File(_) => None,
        FoundEntry::Missing(path) => Some(format!("{}: No such file or directory", path.display())),
        FoundEntry::Error(e) => Some(e.to_string()),
    }
}

/// Writes found paths and keeps score for the exit code.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    /// Destination for found paths
    out: W,
    /// Byte written after each path
    terminator: u8,
    /// Print nothing and stop at the first file
    quiet: bool,
    /// A file was reported
    found: bool,
    /// A missing path or read failure was reported
    failed: bool,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `out`.
    #[must_use]
    pub const fn new(out: W, null_terminated: bool, quiet: bool) -> Self {
        Self {
            out,
            terminator: if null_terminated { b'\0' } else { b'\n' },
            quiet,
            found: false,
            failed: false,
        }
    }

    /// Reports one entry.
    ///
    /// Returns `Break` once nothing more needs to be read, which only
    /// happens in quiet mode after the first file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn report(&mut self, entry: &FoundEntry) -> io::Result<ControlFlow<()>> {
        match entry {
            FoundEntry::File(path) => {
                self.found = true;
                if self.quiet {
                    return Ok(ControlFlow::Break(()));
                }
                self.out
                    .write_all(path.as_os_str().as_encoded_bytes())?;
                self.out.write_all(&[self.terminator])?;
            }
            FoundEntry::Missing(_) | FoundEntry::Error(_) => {
                self.failed = true;
                if let Some(message) = describe_failure(entry) {
                    error(&message);
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Flushes the output and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> io::Result<i32> {
        self.out.flush()?;
        Ok(self.exit_code())
    }

    /// 0 if a file was found, 1 if not, 2 if anything failed. In quiet mode
    /// a found file wins over failures.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match (self.found, self.failed) {
            (true, _) if self.quiet => EXIT_FOUND,
            (_, true) => EXIT_ERROR,
            (true, false) => EXIT_FOUND,
            (false, false) => EXIT_NOT_FOUND,
        }
    }

    /// The underlying writer
    pub const fn get_ref(&self) -> &W {
        &self.out
    }
}
