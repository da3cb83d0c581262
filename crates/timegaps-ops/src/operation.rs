//! What to do with rejected items.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Action applied to rejected items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionAction {
    /// Only report rejected items.
    #[default]
    Report,
    /// Delete rejected items.
    Delete {
        /// Also delete non-empty directories.
        recursive: bool,
    },
    /// Move rejected items into an existing directory.
    Move { destination: PathBuf },
}

impl RetentionAction {
    /// Create a delete action.
    pub fn delete(recursive: bool) -> Self {
        Self::Delete { recursive }
    }

    /// Create a move action.
    pub fn move_to(destination: impl Into<PathBuf>) -> Self {
        Self::Move {
            destination: destination.into(),
        }
    }

    /// Check if the action touches the filesystem.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Report)
    }
}

/// An error that occurred during a file operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
