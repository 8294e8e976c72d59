//! Directory traversal.
//!
//! A [`Walker`] is built once per invocation from [`WalkOptions`]. It loads
//! the rules that apply everywhere, then produces a [`WalkContext`] for each
//! starting directory. A context knows which rule sets are in force for its
//! directory and derives child contexts as the walk descends, so each ignore
//! file is read at most once per walk.
//!
//! Two ways to consume a context:
//!
//! - [`WalkContext::walk`]: lazy, single-threaded, depth-first
//! - [`WalkContext::collect_parallel`]: eager, with subdirectories fanned out
//!   over rayon workers

/// Walker and per-directory context.
pub mod context;
/// Lazy depth-first iterator.
pub mod iter;
/// Options controlling a walk.
pub mod options;
/// Rayon fan-out over subdirectories.
pub mod parallel;

pub use context::{WalkContext, Walker};
pub use iter::Walk;
pub use options::{DEFAULT_GLOB, WalkOptions};
