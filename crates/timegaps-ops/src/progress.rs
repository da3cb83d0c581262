//! Progress reporting types for file operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::OperationError;

/// The type of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    Delete,
    Move,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delete => write!(f, "Delete"),
            Self::Move => write!(f, "Move"),
        }
    }
}

/// Progress information for an ongoing operation.
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of items completed.
    pub items_completed: usize,
    /// Total number of items to process.
    pub items_total: usize,
    /// The item currently being processed.
    pub current_item: Option<PathBuf>,
    /// Errors encountered so far.
    pub errors: Vec<OperationError>,
}

impl OperationProgress {
    /// Create a new progress tracker for an operation.
    pub fn new(operation_type: OperationType, items_total: usize) -> Self {
        Self {
            operation_type,
            items_completed: 0,
            items_total,
            current_item: None,
            errors: Vec::new(),
        }
    }

    /// Add an error to the progress.
    pub fn add_error(&mut self, error: OperationError) {
        self.errors.push(error);
    }

    /// Update the item currently being processed.
    pub fn set_current_item(&mut self, path: Option<PathBuf>) {
        self.current_item = path;
    }

    /// Increment the completed count.
    pub fn complete_item(&mut self) {
        self.items_completed += 1;
    }

    /// Build the completion record.
    pub fn finish(self, succeeded: usize, failed: usize) -> OperationComplete {
        OperationComplete {
            operation_type: self.operation_type,
            succeeded,
            failed,
            errors: self.errors,
        }
    }
}

/// Result of a completed operation.
#[derive(Debug, Clone)]
pub struct OperationComplete {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of items successfully processed.
    pub succeeded: usize,
    /// Number of items that failed.
    pub failed: usize,
    /// Errors that occurred.
    pub errors: Vec<OperationError>,
}

impl OperationComplete {
    /// An operation with nothing to do.
    pub fn empty(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Check if the operation was fully successful.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = match self.operation_type {
            OperationType::Delete => "Deleted",
            OperationType::Move => "Moved",
        };

        if self.failed == 0 {
            format!("{} {} items", action, self.succeeded)
        } else {
            format!("{} {} items, {} failed", action, self.succeeded, self.failed)
        }
    }
}
