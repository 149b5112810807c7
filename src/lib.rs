//! # logmerge
//!
//! Merges rotated log fragments produced by a job scheduler into single
//! append-only log files, deletes the consumed fragments, and purges
//! stale scheduler metadata logs. One pass per invocation; no daemon
//! mode, no dedup, no content validation.
//!
//! ## Data Flow
//!
//! ```text
//! Config ──► patterns, chunk size, sort mode, paths
//!                        │
//!    ┌───────────────────┼──────────────────────┐
//!    ▼                   ▼                      ▼
//! locate ──► sort ──► BatchMerger        scavenge
//! (stdout)           (append+delete)     (scheduler logs)
//! (stderr)
//! ```
//!
//! Ordering can follow filesystem mtimes or, when `sort_by_time_mask`
//! is set, the timestamp embedded in each fragment's filename — the
//! latter survives copy/restore operations that scramble mtimes.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod mask;
pub mod locate;
pub mod sort;
pub mod merge;
pub mod scavenge;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use engine::{MergeEngine, RunSummary};
pub use error::{MergeError, Result};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logmerge
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
