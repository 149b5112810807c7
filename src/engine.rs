//! Merge engine
//!
//! Orchestrates one run: two merge passes (stdout, stderr) followed by
//! the scheduler-log scavenge, all driven by a single validated
//! [`Config`].
//!
//! ## Responsibilities
//! - Build the sort mode once from the configuration
//! - Locate, order, and merge each pattern's fragments
//! - Purge scheduler metadata logs
//!
//! ## Error policy
//! Strict sequencing: the first fatal error aborts the run and later
//! stages are not attempted. There is no partial-success continuation.

use std::path::Path;

use regex::Regex;

use crate::config::Config;
use crate::error::Result;
use crate::locate::locate;
use crate::merge::BatchMerger;
use crate::scavenge::scavenge;
use crate::sort::SortMode;

/// Counts reported by a completed run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// stdout fragments merged and removed
    pub stdout_merged: usize,

    /// stderr fragments merged and removed
    pub stderr_merged: usize,

    /// Scheduler metadata logs deleted
    pub scheduler_removed: usize,
}

/// One-shot merge engine
///
/// Single-threaded and synchronous; one pass at a time, one invocation
/// per process. External scheduling must ensure single-instance
/// execution against a given directory.
pub struct MergeEngine {
    config: Config,
    sorter: SortMode,
    merger: BatchMerger,
}

impl MergeEngine {
    /// Build an engine from a validated configuration
    pub fn new(config: Config) -> Self {
        let sorter = config.sort_mode();
        let merger = BatchMerger::new(config.chunk_size);
        Self {
            config,
            sorter,
            merger,
        }
    }

    /// Execute one full run: stdout merge, stderr merge, scavenge
    pub fn run(&self) -> Result<RunSummary> {
        let stdout_merged = self.merge_pass(
            &self.config.stdout_pattern,
            &self.config.stdout_destination(),
        )?;
        let stderr_merged = self.merge_pass(
            &self.config.stderr_pattern,
            &self.config.stderr_destination(),
        )?;

        let scheduler_removed =
            scavenge(&self.config.logs_path, &self.config.scheduler_pattern)?;

        let summary = RunSummary {
            stdout_merged,
            stderr_merged,
            scheduler_removed,
        };
        tracing::info!(
            stdout_merged = summary.stdout_merged,
            stderr_merged = summary.stderr_merged,
            scheduler_removed = summary.scheduler_removed,
            "run complete"
        );
        Ok(summary)
    }

    /// One merge pass: locate → order → batch-merge into `dest`
    fn merge_pass(&self, pattern: &Regex, dest: &Path) -> Result<usize> {
        let candidates = locate(&self.config.logs_path, pattern)?;
        let ordered = self.sorter.order(candidates)?;

        tracing::info!(
            pattern = %pattern,
            dest = %dest.display(),
            files = ordered.len(),
            "starting merge pass"
        );

        self.merger.merge(&ordered, dest)
    }
}
