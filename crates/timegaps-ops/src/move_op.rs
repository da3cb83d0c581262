//! Async move operation with progress reporting.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::progress::{OperationComplete, OperationProgress, OperationType};
use crate::{OPERATION_CHANNEL_SIZE, OperationError, OperationResult};

/// Start an async move of `sources` into the directory `destination`.
///
/// The destination must be an existing directory. Existing entries in it
/// are never overwritten; such items fail and are left in place.
pub fn start_move(sources: Vec<PathBuf>, destination: PathBuf) -> mpsc::Receiver<OperationResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        if sources.is_empty() {
            let _ = tx
                .send(OperationResult::Complete(OperationComplete::empty(
                    OperationType::Move,
                )))
                .await;
            return;
        }
        move_impl(sources, destination, tx).await;
    });

    rx
}

/// Internal implementation of move operation.
async fn move_impl(sources: Vec<PathBuf>, destination: PathBuf, tx: mpsc::Sender<OperationResult>) {
    let total = sources.len();
    let mut progress = OperationProgress::new(OperationType::Move, total);

    if !destination.is_dir() {
        progress.add_error(OperationError::new(
            destination.clone(),
            "Destination is not an existing directory",
        ));
        let _ = tx
            .send(OperationResult::Complete(progress.finish(0, total)))
            .await;
        return;
    }

    let mut succeeded = 0;
    let mut failed = 0;

    for source in sources {
        let Some(name) = source.file_name() else {
            progress.add_error(OperationError::new(source, "Cannot move an item without a name"));
            failed += 1;
            continue;
        };
        let dest_path = destination.join(name);

        // Moving a directory into itself
        if dest_path.starts_with(&source) {
            progress.add_error(OperationError::new(
                source,
                "Cannot move a directory into itself",
            ));
            failed += 1;
            continue;
        }

        if fs::symlink_metadata(&dest_path).is_ok() {
            progress.add_error(OperationError::new(
                source,
                format!("Target already exists: {}", dest_path.display()),
            ));
            failed += 1;
            continue;
        }

        progress.set_current_item(Some(source.clone()));
        let _ = tx.send(OperationResult::Progress(progress.clone())).await;

        let (from, to) = (source.clone(), dest_path.clone());
        let result = tokio::task::spawn_blocking(move || move_item(&from, &to))
            .await
            .map_err(|e| format!("Task failed: {}", e));

        match result {
            Ok(Ok(())) => {
                debug!(from = %source.display(), to = %dest_path.display(), "moved");
                progress.complete_item();
                succeeded += 1;
            }
            Ok(Err(e)) | Err(e) => {
                warn!(path = %source.display(), error = %e, "move failed");
                progress.add_error(OperationError::new(source, e));
                failed += 1;
            }
        }
    }

    progress.set_current_item(None);
    let _ = tx
        .send(OperationResult::Complete(progress.finish(succeeded, failed)))
        .await;
}

/// Move a single item (file, symlink or directory).
fn move_item(source: &Path, dest: &Path) -> Result<(), String> {
    let metadata = fs::symlink_metadata(source).map_err(|e| format!("Cannot access: {}", e))?;

    // Try rename first (fast path for same filesystem)
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete for cross-filesystem moves
    if metadata.is_dir() {
        copy_dir_recursive(source, dest)?;
        fs::remove_dir_all(source).map_err(|e| format!("Failed to remove source: {}", e))?;
    } else if metadata.file_type().is_symlink() {
        copy_symlink(source, dest)?;
        fs::remove_file(source).map_err(|e| format!("Failed to remove source: {}", e))?;
    } else {
        fs::copy(source, dest).map_err(|e| format!("Failed to copy: {}", e))?;
        fs::remove_file(source).map_err(|e| format!("Failed to remove source: {}", e))?;
    }

    Ok(())
}

/// Recursively copy a directory (for cross-filesystem moves).
fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<(), String> {
    fs::create_dir_all(dest).map_err(|e| format!("Failed to create directory: {}", e))?;

    let entries = fs::read_dir(source).map_err(|e| format!("Failed to read directory: {}", e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry
            .file_type()
            .map_err(|e| format!("Failed to read entry type: {}", e))?;

        if file_type.is_dir() {
            copy_dir_recursive(&path, &dest_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(&path, &dest_path)?;
        } else {
            fs::copy(&path, &dest_path).map_err(|e| format!("Failed to copy file: {}", e))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> Result<(), String> {
    let target = fs::read_link(source).map_err(|e| format!("Failed to read link: {}", e))?;
    std::os::unix::fs::symlink(target, dest).map_err(|e| format!("Failed to create link: {}", e))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, dest: &Path) -> Result<(), String> {
    fs::copy(source, dest)
        .map(|_| ())
        .map_err(|e| format!("Failed to copy link: {}", e))
}
