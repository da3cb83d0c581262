//! Item collection for timegaps.
//!
//! This crate turns the caller's input into timestamped items for the
//! filter engine. Key features:
//!
//! - **Filesystem items** - modification time via `stat`, optionally
//!   following symbolic links
//! - **Names as timestamps** - parse the basename (or a whole string) with a
//!   `strftime` format instead of reading the filesystem
//! - **Streamed lists** - newline- or NUL-separated items from stdin
//!
//! # Example
//!
//! ```rust,no_run
//! use timegaps_scan::{ItemCollector, Separator, read_items};
//!
//! let paths = read_items(std::io::stdin(), Separator::Newline).unwrap();
//! let items = ItemCollector::new().collect_strings(&paths).unwrap();
//!
//! for collected in &items {
//!     println!("{} modified at {}", collected.item.id, collected.item.modified);
//! }
//! ```

mod collector;
mod input;
mod timestamp;

pub use collector::{CollectedItem, ItemCollector};
pub use input::{Separator, read_items, split_items};
pub use timestamp::parse_time;

// Re-export core types for convenience
pub use timegaps_core::{CollectConfig, CollectConfigBuilder, Item, ScanError, TimeSource};
