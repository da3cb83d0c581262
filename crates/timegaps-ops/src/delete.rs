//! Async delete operation with progress reporting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::progress::{OperationComplete, OperationProgress, OperationType};
use crate::{OPERATION_CHANNEL_SIZE, OperationError, OperationResult};

/// Options for delete operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Delete non-empty directories with their contents.
    pub recursive: bool,
}

/// Start an async delete operation.
///
/// Items are deleted one at a time. Symbolic links are removed, never
/// followed. Returns a receiver for progress updates and the final result.
pub fn start_delete(targets: Vec<PathBuf>, options: DeleteOptions) -> mpsc::Receiver<OperationResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        if targets.is_empty() {
            let _ = tx
                .send(OperationResult::Complete(OperationComplete::empty(
                    OperationType::Delete,
                )))
                .await;
            return;
        }
        delete_impl(targets, options, tx).await;
    });

    rx
}

async fn delete_impl(
    targets: Vec<PathBuf>,
    options: DeleteOptions,
    tx: mpsc::Sender<OperationResult>,
) {
    let mut progress = OperationProgress::new(OperationType::Delete, targets.len());
    let mut succeeded = 0;
    let mut failed = 0;

    for target in targets {
        progress.set_current_item(Some(target.clone()));
        let _ = tx.send(OperationResult::Progress(progress.clone())).await;

        let path = target.clone();
        let result = tokio::task::spawn_blocking(move || delete_item(&path, options.recursive))
            .await
            .map_err(|e| format!("Task failed: {}", e));

        match result {
            Ok(Ok(())) => {
                debug!(path = %target.display(), "deleted");
                progress.complete_item();
                succeeded += 1;
            }
            Ok(Err(e)) | Err(e) => {
                warn!(path = %target.display(), error = %e, "delete failed");
                progress.add_error(OperationError::new(target, e));
                failed += 1;
            }
        }
    }

    progress.set_current_item(None);
    let _ = tx
        .send(OperationResult::Complete(progress.finish(succeeded, failed)))
        .await;
}

/// Delete a single item (file, symlink or directory).
fn delete_item(path: &Path, recursive: bool) -> Result<(), String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| describe(e, "Cannot access"))?;

    if metadata.is_dir() {
        if recursive {
            fs::remove_dir_all(path).map_err(|e| describe(e, "Failed to remove directory tree"))
        } else {
            fs::remove_dir(path).map_err(|e| {
                describe(
                    e,
                    "Failed to remove directory (not empty? use recursive delete)",
                )
            })
        }
    } else {
        fs::remove_file(path).map_err(|e| describe(e, "Failed to remove"))
    }
}

fn describe(error: io::Error, context: &str) -> String {
    format!("{}: {}", context, error)
}
