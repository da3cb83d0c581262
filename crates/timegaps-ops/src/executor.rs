//! High-level executor applying a retention action to rejected items.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::delete::{DeleteOptions, start_delete};
use crate::move_op::start_move;
use crate::operation::RetentionAction;
use crate::progress::{OperationComplete, OperationProgress, OperationType};

/// Unified result type for all operations.
#[derive(Debug)]
pub enum OperationResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed.
    Complete(OperationComplete),
}

/// Executor for retention actions.
#[derive(Debug, Default)]
pub struct OperationExecutor;

impl OperationExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self
    }

    /// Execute a delete operation.
    pub fn delete(&self, targets: Vec<PathBuf>, recursive: bool) -> mpsc::Receiver<OperationResult> {
        start_delete(targets, DeleteOptions { recursive })
    }

    /// Execute a move operation.
    pub fn move_to(&self, sources: Vec<PathBuf>, destination: PathBuf) -> mpsc::Receiver<OperationResult> {
        start_move(sources, destination)
    }

    /// Start the operation for `action`, or `None` for [`RetentionAction::Report`].
    pub fn execute(
        &self,
        action: &RetentionAction,
        targets: Vec<PathBuf>,
    ) -> Option<mpsc::Receiver<OperationResult>> {
        match action {
            RetentionAction::Report => None,
            RetentionAction::Delete { recursive } => Some(self.delete(targets, *recursive)),
            RetentionAction::Move { destination } => {
                Some(self.move_to(targets, destination.clone()))
            }
        }
    }

    /// Apply `action` to `targets` and wait for the result.
    ///
    /// `on_progress` is called for every progress update. Returns `None`
    /// for [`RetentionAction::Report`].
    pub async fn run(
        &self,
        action: &RetentionAction,
        targets: Vec<PathBuf>,
        mut on_progress: impl FnMut(&OperationProgress),
    ) -> Option<OperationComplete> {
        let operation_type = match action {
            RetentionAction::Report => return None,
            RetentionAction::Delete { .. } => OperationType::Delete,
            RetentionAction::Move { .. } => OperationType::Move,
        };

        let mut rx = self.execute(action, targets)?;
        while let Some(result) = rx.recv().await {
            match result {
                OperationResult::Progress(progress) => on_progress(&progress),
                OperationResult::Complete(complete) => return Some(complete),
            }
        }

        // The worker stopped without reporting; treat it as a no-op.
        Some(OperationComplete::empty(operation_type))
    }
}
