//! Configuration for logmerge
//!
//! A run is driven by a TOML document with a `[main]` section (patterns,
//! batch size, sort mode) and an optional `[extra]` section (paths and
//! destination names, all defaulted). The document is deserialized into
//! [`RawConfig`] and resolved against the defaults by [`Config::resolve`],
//! a pure function: patterns are compiled exactly once here, and no file
//! is touched before the whole configuration validates.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{MergeError, Result};
use crate::mask::TimeMask;
use crate::sort::SortMode;

// =============================================================================
// Defaults
// =============================================================================

/// Default pattern for scheduler metadata logs.
pub const DEFAULT_SCHEDULER_PATTERN: &str = r"\.json$";

/// Default directory holding the rotated log fragments.
pub const DEFAULT_LOGS_PATH: &str = "/var/log/scheduler/logs";

/// Default directory receiving the merged log files.
pub const DEFAULT_SAVE_PATH: &str = "/var/log/scheduler";

/// Default merged stdout file name.
pub const DEFAULT_STDOUT_LOG_NAME: &str = "stdout.log";

/// Default merged stderr file name.
pub const DEFAULT_STDERR_LOG_NAME: &str = "stderr.log";

/// Default format of the timestamp embedded in fragment names.
pub const DEFAULT_TIME_MASK: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Raw (on-disk) form
// =============================================================================

/// Configuration document as written by the user, before resolution.
///
/// `[main]` carries the required fields; `[extra]` is entirely optional
/// and every field in it has a default.
#[derive(Debug, Deserialize)]
pub struct RawConfig {
    main: RawMain,
    #[serde(default)]
    extra: RawExtra,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    stdout_pattern: String,
    stderr_pattern: String,
    chunk: usize,
    #[serde(default)]
    sort_by_time_mask: bool,
    scheduler_pattern: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawExtra {
    logs_path: Option<PathBuf>,
    save_path: Option<PathBuf>,
    stdout_log_name: Option<String>,
    stderr_log_name: Option<String>,
    time_mask: Option<String>,
}

// =============================================================================
// Resolved form
// =============================================================================

/// Immutable, validated configuration for one run
///
/// Patterns are stored compiled; an invalid pattern never makes it past
/// [`Config::resolve`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Matches stdout log fragments under `logs_path`
    pub stdout_pattern: Regex,

    /// Matches stderr log fragments under `logs_path`
    pub stderr_pattern: Regex,

    /// Matches scheduler metadata logs under `logs_path`
    pub scheduler_pattern: Regex,

    /// Files per read-append-delete batch (always >= 1)
    pub chunk_size: usize,

    /// Sort fragments by the timestamp in their name instead of mtime
    pub sort_by_time_mask: bool,

    /// Format of the timestamp embedded in fragment names
    pub time_mask: String,

    /// Directory holding the rotated fragments
    pub logs_path: PathBuf,

    /// Directory receiving the merged files
    pub save_path: PathBuf,

    /// Merged stdout file name under `save_path`
    pub stdout_log_name: String,

    /// Merged stderr file name under `save_path`
    pub stderr_log_name: String,
}

impl Config {
    /// Load and resolve a configuration file
    ///
    /// Fatal before any file is touched: a missing file, an
    /// undeserializable document, or an invalid field all fail the run
    /// here.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|e| {
            MergeError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Self::resolve(raw)
    }

    /// Resolve a raw document against the defaults
    ///
    /// Pure: validates `chunk`, checks the time mask is present when
    /// mask-sorting is requested, and compiles all three patterns.
    pub fn resolve(raw: RawConfig) -> Result<Self> {
        if raw.main.chunk == 0 {
            return Err(MergeError::Config(
                "main.chunk must be a positive integer".to_string(),
            ));
        }

        let time_mask = raw
            .extra
            .time_mask
            .unwrap_or_else(|| DEFAULT_TIME_MASK.to_string());
        if raw.main.sort_by_time_mask && time_mask.is_empty() {
            return Err(MergeError::Config(
                "extra.time_mask is required when main.sort_by_time_mask is set".to_string(),
            ));
        }

        let scheduler_pattern = raw
            .main
            .scheduler_pattern
            .unwrap_or_else(|| DEFAULT_SCHEDULER_PATTERN.to_string());

        Ok(Self {
            stdout_pattern: compile_pattern(&raw.main.stdout_pattern)?,
            stderr_pattern: compile_pattern(&raw.main.stderr_pattern)?,
            scheduler_pattern: compile_pattern(&scheduler_pattern)?,
            chunk_size: raw.main.chunk,
            sort_by_time_mask: raw.main.sort_by_time_mask,
            time_mask,
            logs_path: raw
                .extra
                .logs_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGS_PATH)),
            save_path: raw
                .extra
                .save_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH)),
            stdout_log_name: raw
                .extra
                .stdout_log_name
                .unwrap_or_else(|| DEFAULT_STDOUT_LOG_NAME.to_string()),
            stderr_log_name: raw
                .extra
                .stderr_log_name
                .unwrap_or_else(|| DEFAULT_STDERR_LOG_NAME.to_string()),
        })
    }

    /// Sort mode for this run, chosen once from `sort_by_time_mask`
    pub fn sort_mode(&self) -> SortMode {
        if self.sort_by_time_mask {
            SortMode::ByMask(TimeMask::new(&self.time_mask))
        } else {
            SortMode::ModifiedTime
        }
    }

    /// Destination path of the merged stdout file
    pub fn stdout_destination(&self) -> PathBuf {
        self.save_path.join(&self.stdout_log_name)
    }

    /// Destination path of the merged stderr file
    pub fn stderr_destination(&self) -> PathBuf {
        self.save_path.join(&self.stderr_log_name)
    }
}

/// Compile a filename pattern, case-insensitively
///
/// Matching is partial (unanchored) search over the base name; patterns
/// wanting an anchor must carry their own `^`/`$`.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| MergeError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

// =============================================================================
// Tests
// =============================================================================
