//! Item collection configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::ScanError;

/// Where an item's timestamp comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TimeSource {
    /// The filesystem modification time (`stat`).
    #[default]
    Modified,
    /// Parse the path's basename with a `strftime` format.
    Basename { format: String },
    /// Parse the whole item string with a `strftime` format; items are not
    /// paths and the filesystem is never touched.
    Text { format: String },
}

impl TimeSource {
    /// The parse format, if any.
    pub fn format(&self) -> Option<&str> {
        match self {
            TimeSource::Modified => None,
            TimeSource::Basename { format } | TimeSource::Text { format } => Some(format),
        }
    }

    /// Check if items must exist on the filesystem.
    pub fn needs_filesystem(&self) -> bool {
        !matches!(self, TimeSource::Text { .. })
    }
}

/// Configuration for collecting items.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CollectConfig {
    /// Follow symbolic links when reading modification times.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Timestamp source.
    #[builder(default)]
    #[serde(default)]
    pub time_source: TimeSource,
}

impl CollectConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(format) = self.time_source.as_ref().and_then(TimeSource::format) {
            if format.trim().is_empty() {
                return Err("Time format cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl CollectConfig {
    /// Create a new config builder.
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }
}

impl From<CollectConfigBuilderError> for ScanError {
    fn from(err: CollectConfigBuilderError) -> Self {
        ScanError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
