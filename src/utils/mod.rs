//! Utility functions and helpers.
//!
//! - [`paths`]: tilde expansion and relative path computation
//! - [`thread_pool`]: worker pool for parallel walks

/// Path manipulation and resolution utilities
pub mod paths;
/// Thread pool configuration for parallel operations
pub mod thread_pool;

pub use paths::{expand_tilde, relative_to};
