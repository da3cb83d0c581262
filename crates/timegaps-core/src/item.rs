//! Items to be filtered.

use std::time::{SystemTime, UNIX_EPOCH};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// An identifier stamped with a modification time.
///
/// The identifier is opaque to the filter; it is usually a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Caller-supplied identifier.
    pub id: CompactString,
    /// Modification time in seconds since the Unix epoch.
    pub modified: i64,
}

impl Item {
    /// Create a new item.
    pub fn new(id: impl Into<CompactString>, modified: i64) -> Self {
        Self {
            id: id.into(),
            modified,
        }
    }

    /// Create an item from a `SystemTime` modification time.
    pub fn with_system_time(id: impl Into<CompactString>, modified: SystemTime) -> Self {
        Self::new(id, unix_seconds(modified))
    }

    /// Age relative to `now` in seconds. Negative for items from the future.
    pub fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.modified)
    }
}

/// Convert a `SystemTime` to whole seconds since the Unix epoch, rounding
/// towards negative infinity.
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            let carry = i64::from(before.subsec_nanos() > 0);
            0i64.saturating_sub(secs).saturating_sub(carry)
        }
    }
}
