//! Mapping timestamps onto category periods.
//!
//! Every timed category has a fixed boundary (the minimum age for an item
//! to fall into it) and a period function that buckets timestamps. All
//! calendar math is done in UTC.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use timegaps_core::Category;

pub const HOUR: i64 = 60 * 60;
pub const DAY: i64 = 24 * HOUR;
pub const WEEK: i64 = 7 * DAY;
pub const MONTH: i64 = 30 * DAY;
pub const YEAR: i64 = 365 * DAY;

/// A discrete time bucket within a category.
///
/// Periods of the same category are totally ordered: a later timestamp
/// never maps to an earlier period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Hours since the Unix epoch.
    Hour(i64),
    /// UTC days since the Unix epoch.
    Day(i64),
    /// ISO 8601 week.
    Week { year: i32, week: u32 },
    /// Calendar month, 1-based.
    Month { year: i32, month: u32 },
    /// Calendar year.
    Year(i32),
}

impl Period {
    /// Period of `timestamp` within `category`. `recent` has no periods.
    pub fn of(timestamp: i64, category: Category) -> Option<Period> {
        spec_for(category).map(|spec| (spec.period_of)(timestamp))
    }

    /// The category this period belongs to.
    pub fn category(&self) -> Category {
        match self {
            Period::Hour(_) => Category::Hours,
            Period::Day(_) => Category::Days,
            Period::Week { .. } => Category::Weeks,
            Period::Month { .. } => Category::Months,
            Period::Year(_) => Category::Years,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Period::Hour(hour) => write!(
                f,
                "{}",
                utc(hour.saturating_mul(HOUR)).format("%Y-%m-%d %H:00")
            ),
            Period::Day(day) => write!(f, "{}", utc(day.saturating_mul(DAY)).format("%Y-%m-%d")),
            Period::Week { year, week } => write!(f, "{year}-W{week:02}"),
            Period::Month { year, month } => write!(f, "{year}-{month:02}"),
            Period::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Boundary and period function of a timed category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    /// The category.
    pub category: Category,
    /// Minimum age in seconds for an item to belong to this category.
    pub boundary: i64,
    /// Bucket a timestamp into a period.
    pub period_of: fn(i64) -> Period,
}

/// The timed categories, smallest span first.
pub const CATEGORY_TABLE: [CategorySpec; 5] = [
    CategorySpec {
        category: Category::Hours,
        boundary: HOUR,
        period_of: hour_of,
    },
    CategorySpec {
        category: Category::Days,
        boundary: DAY,
        period_of: day_of,
    },
    CategorySpec {
        category: Category::Weeks,
        boundary: WEEK,
        period_of: week_of,
    },
    CategorySpec {
        category: Category::Months,
        boundary: MONTH,
        period_of: month_of,
    },
    CategorySpec {
        category: Category::Years,
        boundary: YEAR,
        period_of: year_of,
    },
];

/// Look up the table entry for a category.
pub fn spec_for(category: Category) -> Option<&'static CategorySpec> {
    CATEGORY_TABLE.iter().find(|spec| spec.category == category)
}

/// Boundary duration of a category in seconds, `None` for `recent`.
pub fn boundary(category: Category) -> Option<i64> {
    spec_for(category).map(|spec| spec.boundary)
}

/// Timestamp as a UTC date, clamped to chrono's representable range.
fn utc(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or(if timestamp < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

fn hour_of(timestamp: i64) -> Period {
    Period::Hour(timestamp.div_euclid(HOUR))
}

fn day_of(timestamp: i64) -> Period {
    Period::Day(timestamp.div_euclid(DAY))
}

fn week_of(timestamp: i64) -> Period {
    let week = utc(timestamp).iso_week();
    Period::Week {
        year: week.year(),
        week: week.week(),
    }
}

fn month_of(timestamp: i64) -> Period {
    let date = utc(timestamp);
    Period::Month {
        year: date.year(),
        month: date.month(),
    }
}

fn year_of(timestamp: i64) -> Period {
    Period::Year(utc(timestamp).year())
}
