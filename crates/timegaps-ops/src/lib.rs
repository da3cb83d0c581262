//! File operations for timegaps.
//!
//! This crate applies the retention decision to the filesystem: rejected
//! items are deleted or moved into a directory. Operations run on a Tokio
//! task, one item at a time, and report progress via channels.

mod delete;
mod executor;
mod move_op;
mod operation;
mod progress;

pub use delete::{DeleteOptions, start_delete};
pub use executor::{OperationExecutor, OperationResult};
pub use move_op::start_move;
pub use operation::{OperationError, RetentionAction};
pub use progress::{OperationComplete, OperationProgress, OperationType};

/// Default channel buffer size for operation progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;
