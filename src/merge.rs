//! Batch merger
//!
//! Consumes an ordered list of log fragments in fixed-size batches,
//! appending each batch's bytes to the destination file and deleting
//! the sources afterwards.
//!
//! ## Guarantees
//! - The destination's byte layout is the concatenation of the sources
//!   in input order; batch boundaries leave no trace (no separators).
//! - The destination handle is append-only: existing bytes are never
//!   truncated or rewritten.
//! - Deletion happens only after that batch's append succeeded. A crash
//!   between append and delete can leave one batch both merged and on
//!   disk; prior batches are never rolled back. At-least-once, not
//!   exactly-once — acceptable for log data.
//! - A read failure inside a batch aborts the pass before anything from
//!   that batch is written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Merges ordered file batches into one append-only destination
#[derive(Debug, Clone, Copy)]
pub struct BatchMerger {
    /// Files per read-append-delete batch
    chunk_size: usize,
}

impl BatchMerger {
    /// Create a merger with the given batch size (must be >= 1,
    /// enforced at configuration load)
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Merge `ordered` into `dest`, deleting sources batch by batch
    ///
    /// Returns the number of files merged and removed. With zero input
    /// files this is a no-op: neither the destination file nor its
    /// parent directory is created.
    pub fn merge(&self, ordered: &[PathBuf], dest: &Path) -> Result<usize> {
        if ordered.is_empty() {
            tracing::debug!(dest = %dest.display(), "no files to merge");
            return Ok(0);
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut processed = 0;
        for batch in ordered.chunks(self.chunk_size) {
            let payload = read_batch(batch)?;
            self.append(dest, &payload)?;

            for path in batch {
                fs::remove_file(path)?;
            }

            processed += batch.len();
            tracing::debug!(
                dest = %dest.display(),
                processed,
                total = ordered.len(),
                "merged batch"
            );
        }

        Ok(processed)
    }

    /// Append `payload` to `dest` in a single write
    ///
    /// Opened append-only, created if absent; never truncates.
    fn append(&self, dest: &Path, payload: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(dest)?;
        file.write_all(payload)?;
        Ok(())
    }
}

/// Read every file of a batch, in batch order, into one payload
///
/// All-or-nothing: the first unreadable file fails the batch and
/// nothing of it is written. The payload is the explicit per-batch
/// result; there is no accumulator shared across batches.
fn read_batch(batch: &[PathBuf]) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    for path in batch {
        payload.extend_from_slice(&fs::read(path)?);
    }
    Ok(payload)
}

// =============================================================================
// Tests
// =============================================================================
