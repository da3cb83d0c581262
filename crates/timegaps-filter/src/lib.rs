//! Time-gap filtering for timegaps.
//!
//! Given items stamped with modification times and a set of retention
//! rules, this crate decides which items to keep:
//!
//! 1. **Classify** - each item falls into one category by age. Only the
//!    categories named in the rules form age bands; anything younger than
//!    the smallest band (or from the future) is `recent`.
//! 2. **Bucket** - within a category, items are mapped to periods (UTC
//!    hour, UTC day, ISO week, calendar month, calendar year) and only the
//!    newest item of each period can be kept.
//! 3. **Select** - periods are ranked newest first and the representatives
//!    of the first N periods are accepted, N being the category's count.
//!
//! `recent` items are all accepted unless the rules give `recent` a count,
//! in which case only that many of the newest are kept.
//!
//! ```rust
//! use timegaps_core::{Item, RuleSet};
//! use timegaps_filter::{FilterConfig, TimeFilter};
//!
//! const DAY: i64 = 86_400;
//! let now = 20_000 * DAY + DAY / 2;
//!
//! let rules = RuleSet::parse("days2").unwrap();
//! let filter = TimeFilter::with_config(rules, FilterConfig::at(now));
//!
//! let items = vec![
//!     Item::new("snapshot-1", now - DAY),
//!     Item::new("snapshot-2", now - 2 * DAY),
//!     Item::new("snapshot-3", now - 3 * DAY),
//! ];
//! let report = filter.decide(&items);
//!
//! let rejected: Vec<&str> = report.rejected().map(|d| d.id.as_str()).collect();
//! assert_eq!(rejected, vec!["snapshot-3"]);
//! ```

pub mod classify;
mod engine;
pub mod period;
mod select;

pub use classify::{Boundaries, classify};
pub use engine::{
    CategorySummary, Decision, FilterConfig, FilterConfigBuilder, FilterReport, TimeFilter, decide,
};
pub use period::{CATEGORY_TABLE, CategorySpec, Period};
pub use select::{Candidate, RejectReason, Selection, Verdict, select_periods, select_recent};

// Re-export core types
pub use timegaps_core::{Category, Item, Retention, RuleSet};
