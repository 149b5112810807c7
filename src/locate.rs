//! File locator
//!
//! Lists a single directory and filters the entries by a compiled
//! filename pattern. Non-recursive; the merge and scavenge passes both
//! start here.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;

/// Locate candidate files under `root` whose base name matches `pattern`
///
/// Returns every regular file in `root` (directories and
/// symlinks-to-directories are skipped, subdirectories are not entered)
/// whose base name matches via partial search. A missing or unlistable
/// `root` is a filesystem error, fatal to the invoking pass; zero
/// matches is an empty list, not an error.
///
/// The result is sorted by name so that a later stable sort has a
/// deterministic tie order.
pub fn locate(root: &Path, pattern: &Regex) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if pattern.is_match(name) {
            matches.push(path);
        }
    }

    matches.sort();
    Ok(matches)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;
    use tempfile::TempDir;

    fn pattern(text: &str) -> Regex {
        RegexBuilder::new(text).case_insensitive(true).build().unwrap()
    }

    #[test]
    fn finds_matching_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a_stdout_log.log"), b"x").unwrap();
        fs::write(dir.path().join("b_stdout_log.log"), b"y").unwrap();
        fs::write(dir.path().join("scheduler_log.json"), b"z").unwrap();

        let found = locate(dir.path(), &pattern(r".*stdout_log\.log$")).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|p| p.to_str().unwrap().ends_with("stdout_log.log")));
    }

    #[test]
    fn skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested_stdout_log.log")).unwrap();
        fs::write(
            dir.path()
                .join("nested_stdout_log.log")
                .join("inner_stdout_log.log"),
            b"x",
        )
        .unwrap();

        let found = locate(dir.path(), &pattern(r".*stdout_log\.log$")).unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn empty_match_is_not_an_error() {
        let dir = TempDir::new().unwrap();

        let found = locate(dir.path(), &pattern(r".*stdout_log\.log$")).unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");

        assert!(locate(&missing, &pattern(".*")).is_err());
    }

    #[test]
    fn result_is_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.log"), b"").unwrap();
        fs::write(dir.path().join("a.log"), b"").unwrap();
        fs::write(dir.path().join("c.log"), b"").unwrap();

        let found = locate(dir.path(), &pattern(r"\.log$")).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.log", "b.log", "c.log"]);
    }
}
