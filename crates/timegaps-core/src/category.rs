//! Time categories.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A class of retention granularity, ordered by increasing time span.
///
/// The string form is the lowercase name used in rules strings
/// (`recent`, `hours`, `days`, `weeks`, `months`, `years`). Parsing is
/// case-sensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Younger than every configured boundary.
    Recent,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Category {
    /// All categories, smallest span first.
    pub const ALL: [Category; 6] = [
        Category::Recent,
        Category::Hours,
        Category::Days,
        Category::Weeks,
        Category::Months,
        Category::Years,
    ];

    /// Categories that have a boundary and a period function.
    pub const TIMED: [Category; 5] = [
        Category::Hours,
        Category::Days,
        Category::Weeks,
        Category::Months,
        Category::Years,
    ];

    /// Check if this is the `recent` category.
    pub fn is_recent(self) -> bool {
        matches!(self, Category::Recent)
    }

    /// Name as used in rules strings.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
