//! Turning paths and strings into timestamped items.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use tracing::debug;

use timegaps_core::{CollectConfig, Item, ScanError, TimeSource};

use crate::timestamp::parse_time;

/// An item together with the path it came from.
///
/// `item.id` is a lossy UTF-8 rendering of the path. Use `path` whenever
/// the exact name matters (printing, deleting, moving).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedItem {
    /// The timestamped item handed to the filter.
    pub item: Item,
    /// Filesystem path, absent for plain-text items.
    pub path: Option<PathBuf>,
}

/// Collects items from the filesystem or from plain strings.
#[derive(Debug, Clone, Default)]
pub struct ItemCollector {
    config: CollectConfig,
}

impl ItemCollector {
    /// Create a collector using modification times.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector with a custom config.
    pub fn with_config(config: CollectConfig) -> Self {
        Self { config }
    }

    /// Collect items from paths. Stops at the first inaccessible path.
    pub fn collect_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<CollectedItem>, ScanError> {
        paths.iter().map(|p| self.collect_path(p.as_ref())).collect()
    }

    /// Collect items from strings, e.g. read from stdin.
    ///
    /// With [`TimeSource::Text`] the strings are parsed directly; otherwise
    /// they are treated as paths.
    pub fn collect_strings<S: AsRef<str>>(&self, entries: &[S]) -> Result<Vec<CollectedItem>, ScanError> {
        entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref();
                match &self.config.time_source {
                    TimeSource::Text { format } => Ok(CollectedItem {
                        item: Item::new(entry, parse_or_fail(entry, format)?),
                        path: None,
                    }),
                    _ => self.collect_path(Path::new(entry)),
                }
            })
            .collect()
    }

    /// Collect a single path.
    pub fn collect_path(&self, path: &Path) -> Result<CollectedItem, ScanError> {
        let id = path.to_string_lossy();
        let metadata = self.metadata(path)?;

        let modified = match &self.config.time_source {
            TimeSource::Modified => {
                let modified = metadata.modified().map_err(|e| ScanError::io(path, e))?;
                timegaps_core::unix_seconds(modified)
            }
            TimeSource::Basename { format } | TimeSource::Text { format } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_else(|| id.clone());
                parse_or_fail(&name, format)?
            }
        };

        debug!(item = %id, modified, dir = metadata.is_dir(), "collected item");
        Ok(CollectedItem {
            item: Item::new(id.as_ref(), modified),
            path: Some(path.to_path_buf()),
        })
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, ScanError> {
        let result = if self.config.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        result.map_err(|e| ScanError::io(path, e))
    }
}

fn parse_or_fail(text: &str, format: &str) -> Result<i64, ScanError> {
    parse_time(text, format).ok_or_else(|| ScanError::TimeParse {
        item: text.to_string(),
        format: format.to_string(),
    })
}
