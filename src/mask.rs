//! Time mask
//!
//! Rotated fragments carry their creation timestamp in the filename
//! (e.g. `20191001_072126_stdout_log.log`). The mask describes that
//! timestamp's format and derives a numeric sort key from it, giving a
//! deterministic order that survives copy/restore operations where
//! filesystem mtimes do not.

use chrono::NaiveDateTime;

use crate::error::{MergeError, Result};

/// Fixed delimiter separating timestamp segments from each other and
/// from the rest of the filename.
const DELIMITER: char = '_';

/// A timestamp format embedded in log filenames
///
/// The delimiter count is derived once at construction and never
/// changes.
#[derive(Debug, Clone)]
pub struct TimeMask {
    /// strftime-style format string, e.g. `%Y%m%d_%H%M%S`
    format: String,

    /// Number of delimiters inside the format itself
    delimiters: usize,
}

impl TimeMask {
    /// Wrap a format string, counting its delimiters
    pub fn new(format: impl Into<String>) -> Self {
        let format = format.into();
        let delimiters = format.matches(DELIMITER).count();
        Self { format, delimiters }
    }

    /// Derive the sort key (epoch seconds) from a fragment's base name
    ///
    /// The name is split on the delimiter into at most `delimiters + 2`
    /// parts from the left; the trailing part is the non-timestamp
    /// remainder and is dropped, the rest is rejoined and parsed against
    /// the format. Any mismatch, including a name with too few segments,
    /// is a [`MergeError::TimeParse`] — a naming-contract violation that
    /// aborts the whole pass, not a per-file condition.
    pub fn key_for(&self, name: &str) -> Result<i64> {
        let parts: Vec<&str> = name.splitn(self.delimiters + 2, DELIMITER).collect();
        let stamp = parts[..parts.len() - 1].join("_");

        let parsed = NaiveDateTime::parse_from_str(&stamp, &self.format).map_err(|source| {
            MergeError::TimeParse {
                name: name.to_string(),
                source,
            }
        })?;

        Ok(parsed.and_utc().timestamp())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_for_well_formed_name() {
        let mask = TimeMask::new("%Y%m%d_%H%M%S");

        let key = mask.key_for("20191001_072126_stdout_log.log").unwrap();

        // 2019-10-01 07:21:26 UTC
        assert_eq!(key, 1_569_914_486);
    }

    #[test]
    fn keys_order_by_embedded_timestamp() {
        let mask = TimeMask::new("%Y%m%d_%H%M%S");

        let earlier = mask.key_for("20191001_072126_stdout_log.log").unwrap();
        let later = mask.key_for("20191001_072226_stdout_log.log").unwrap();

        assert!(earlier < later);
    }

    #[test]
    fn suffix_with_extra_delimiters_is_ignored() {
        let mask = TimeMask::new("%Y%m%d_%H%M%S");

        // "stderr_log.log" contains the delimiter; only the first
        // delimiters+1 segments belong to the timestamp.
        assert!(mask.key_for("20191001_072126_stderr_log.log").is_ok());
    }

    #[test]
    fn too_few_segments_is_a_parse_error() {
        let mask = TimeMask::new("%Y%m%d_%H%M%S");

        let result = mask.key_for("20191001_stdout.log");

        assert!(matches!(result, Err(MergeError::TimeParse { .. })));
    }

    #[test]
    fn non_timestamp_name_is_a_parse_error() {
        let mask = TimeMask::new("%Y%m%d_%H%M%S");

        let result = mask.key_for("not_a_time_stamp.log");

        assert!(matches!(result, Err(MergeError::TimeParse { .. })));
    }
}
