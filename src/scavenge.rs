//! Scavenge job
//!
//! Unconditional deletion of scheduler metadata logs. Unlike the merge
//! pass there is nothing to preserve, so the matched files are removed
//! without ordering or content handling.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::locate::locate;

/// Delete every file under `root` matching `pattern`
///
/// Returns the count deleted. Fail-fast: the first filesystem error
/// (listing or delete) aborts the pass, matching the merge pass's
/// fatal-on-error policy.
pub fn scavenge(root: &Path, pattern: &Regex) -> Result<usize> {
    let files = locate(root, pattern)?;

    let mut removed = 0;
    for path in &files {
        fs::remove_file(path)?;
        removed += 1;
    }

    tracing::debug!(root = %root.display(), removed, "scavenged scheduler logs");
    Ok(removed)
}

// =============================================================================
// Tests
// =============================================================================
