//! Sorter
//!
//! Orders a candidate set ascending by sort key before merging. Two
//! mutually exclusive modes, chosen once per run from the
//! configuration:
//!
//! - **mtime**: key is the filesystem modification time. Cheap, but
//!   unreliable after copy/restore operations or clock skew.
//! - **time mask**: key is the timestamp embedded in the filename,
//!   parsed per [`TimeMask`]. Deterministic regardless of storage
//!   metadata.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;
use crate::mask::TimeMask;

/// How merge candidates are ordered
#[derive(Debug, Clone)]
pub enum SortMode {
    /// Order by filesystem modification time
    ModifiedTime,

    /// Order by the timestamp embedded in the filename
    ByMask(TimeMask),
}

impl SortMode {
    /// Order `files` ascending by this mode's key
    ///
    /// The sort is stable: equal keys keep the input (listing) order.
    /// In mask mode a single unparsable name fails the whole call —
    /// the sort key cannot be trusted for any remaining file either.
    pub fn order(&self, files: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        match self {
            SortMode::ModifiedTime => {
                let mut keyed: Vec<(SystemTime, PathBuf)> = files
                    .into_iter()
                    .map(|path| Ok((fs::metadata(&path)?.modified()?, path)))
                    .collect::<Result<_>>()?;
                keyed.sort_by_key(|(mtime, _)| *mtime);
                Ok(keyed.into_iter().map(|(_, path)| path).collect())
            }
            SortMode::ByMask(mask) => {
                let mut keyed: Vec<(i64, PathBuf)> = files
                    .into_iter()
                    .map(|path| Ok((mask.key_for(&base_name(&path))?, path)))
                    .collect::<Result<_>>()?;
                keyed.sort_by_key(|(stamp, _)| *stamp);
                Ok(keyed.into_iter().map(|(_, path)| path).collect())
            }
        }
    }
}

/// Base name of a path as UTF-8, lossy
///
/// Locate only yields paths with valid UTF-8 names, so the lossy
/// conversion never actually replaces anything on that route.
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use tempfile::TempDir;

    #[test]
    fn mask_mode_ignores_filesystem_order() {
        let dir = TempDir::new().unwrap();
        // Written later-timestamp first.
        let late = dir.path().join("20191001_072226_stdout_log.log");
        let early = dir.path().join("20191001_072126_stdout_log.log");
        fs::write(&late, b"late").unwrap();
        fs::write(&early, b"early").unwrap();

        let mode = SortMode::ByMask(TimeMask::new("%Y%m%d_%H%M%S"));
        let ordered = mode.order(vec![late.clone(), early.clone()]).unwrap();

        assert_eq!(ordered, vec![early, late]);
    }

    #[test]
    fn mask_mode_fails_on_malformed_name() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("20191001_072126_stdout_log.log");
        let bad = dir.path().join("broken.log");
        fs::write(&good, b"").unwrap();
        fs::write(&bad, b"").unwrap();

        let mode = SortMode::ByMask(TimeMask::new("%Y%m%d_%H%M%S"));
        let result = mode.order(vec![good, bad]);

        assert!(matches!(result, Err(MergeError::TimeParse { .. })));
    }

    #[test]
    fn mtime_mode_follows_write_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("z.log");
        let second = dir.path().join("a.log");
        fs::write(&first, b"").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::write(&second, b"").unwrap();

        let ordered = SortMode::ModifiedTime
            .order(vec![second.clone(), first.clone()])
            .unwrap();

        assert_eq!(ordered, vec![first, second]);
    }
}
