//! The decision engine: classification plus per-category selection.

use std::time::SystemTime;

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use timegaps_core::{Category, Item, Retention, RuleSet, unix_seconds};

use crate::classify::{Boundaries, classify};
use crate::period::Period;
use crate::select::{Candidate, Selection, Verdict, select_periods, select_recent};

/// Configuration for a filter run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct FilterConfig {
    /// Reference time in seconds since the Unix epoch (default: now).
    ///
    /// Captured once; every age in a run is measured against it.
    #[builder(default = "unix_seconds(SystemTime::now())")]
    pub reference_time: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            reference_time: unix_seconds(SystemTime::now()),
        }
    }
}

impl FilterConfig {
    /// Create a new config builder.
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::default()
    }

    /// Config with a fixed reference time.
    pub fn at(reference_time: i64) -> Self {
        Self { reference_time }
    }
}

/// The decision for one input item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Position in the input.
    pub index: usize,
    /// Item identifier.
    pub id: CompactString,
    /// Item timestamp.
    pub modified: i64,
    /// Category the item was classified into.
    pub category: Category,
    /// Period within the category (`None` for `recent`).
    pub period: Option<Period>,
    /// Accepted or rejected.
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl Decision {
    /// Check if the item is kept.
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Per-category statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub retention: Retention,
    /// Items classified into the category.
    pub items: usize,
    /// Distinct periods among those items.
    pub periods: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// Result of a filter run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterReport {
    /// Reference time used for all ages.
    pub reference_time: i64,
    /// Rules the items were filtered with.
    pub rules: RuleSet,
    /// One decision per input item, in input order.
    pub decisions: Vec<Decision>,
    /// Statistics for every category that was configured or received items.
    pub summaries: Vec<CategorySummary>,
}

impl FilterReport {
    /// Accepted items in input order.
    pub fn accepted(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter().filter(|d| d.is_accepted())
    }

    /// Rejected items in input order.
    pub fn rejected(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter().filter(|d| !d.is_accepted())
    }

    /// Number of accepted items.
    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    /// Number of rejected items.
    pub fn rejected_count(&self) -> usize {
        self.decisions.len() - self.accepted_count()
    }

    /// Category of the item at `index`.
    pub fn category_of(&self, index: usize) -> Option<Category> {
        self.decisions.get(index).map(|d| d.category)
    }

    /// Check if the item at `index` was accepted.
    pub fn is_accepted(&self, index: usize) -> bool {
        self.decisions.get(index).is_some_and(Decision::is_accepted)
    }

    /// Statistics for one category.
    pub fn summary(&self, category: Category) -> Option<&CategorySummary> {
        self.summaries.iter().find(|s| s.category == category)
    }
}

/// Time-gap filter over a list of items.
pub struct TimeFilter {
    rules: RuleSet,
    config: FilterConfig,
    boundaries: Boundaries,
}

impl TimeFilter {
    /// Create a filter with the reference time set to now.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_config(rules, FilterConfig::default())
    }

    /// Create a filter with a custom config.
    pub fn with_config(rules: RuleSet, config: FilterConfig) -> Self {
        let boundaries = Boundaries::from_rules(&rules);
        Self {
            rules,
            config,
            boundaries,
        }
    }

    /// The rules in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The reference time in use.
    pub fn reference_time(&self) -> i64 {
        self.config.reference_time
    }

    /// Decide which items to keep.
    pub fn decide(&self, items: &[Item]) -> FilterReport {
        let now = self.config.reference_time;
        debug!(
            now,
            items = items.len(),
            bands = ?self.boundaries.categories().collect::<Vec<_>>(),
            recent_below = ?self.boundaries.smallest(),
            "deciding"
        );

        // Bucket by category, preserving input order inside each bucket.
        let mut buckets: [Vec<Candidate>; 6] = Default::default();
        for (index, item) in items.iter().enumerate() {
            let category = classify(item.modified, now, &self.boundaries);
            trace!(id = %item.id, age = item.age(now), %category, "classified");
            buckets[bucket_index(category)].push(Candidate {
                index,
                modified: item.modified,
            });
        }

        let mut slots: Vec<Option<(Category, Selection)>> = vec![None; items.len()];
        let mut summaries = Vec::new();

        for (category, candidates) in Category::ALL.into_iter().zip(buckets.iter()) {
            let retention = self.rules.retention(category);
            if candidates.is_empty() && !self.rules.is_explicit(category) {
                continue;
            }

            let selections = if category.is_recent() {
                select_recent(candidates, retention)
            } else {
                select_periods(candidates, category, retention)
            };

            let summary = summarize(category, retention, &selections);
            debug!(
                %category,
                items = summary.items,
                periods = summary.periods,
                accepted = summary.accepted,
                rejected = summary.rejected,
                "category selected"
            );
            summaries.push(summary);

            for selection in selections {
                slots[selection.index] = Some((category, selection));
            }
        }

        let decisions = items
            .iter()
            .zip(slots)
            .enumerate()
            .filter_map(|(index, (item, slot))| {
                slot.map(|(category, selection)| Decision {
                    index,
                    id: item.id.clone(),
                    modified: item.modified,
                    category,
                    period: selection.period,
                    verdict: selection.verdict,
                })
            })
            .collect();

        FilterReport {
            reference_time: now,
            rules: self.rules.clone(),
            decisions,
            summaries,
        }
    }
}

/// Decide which of `items` to keep under `rules`, measuring ages from `now`.
pub fn decide(items: &[Item], rules: &RuleSet, now: i64) -> FilterReport {
    TimeFilter::with_config(rules.clone(), FilterConfig::at(now)).decide(items)
}

fn bucket_index(category: Category) -> usize {
    Category::ALL
        .iter()
        .position(|&c| c == category)
        .unwrap_or_default()
}

fn summarize(category: Category, retention: Retention, selections: &[Selection]) -> CategorySummary {
    let accepted = selections.iter().filter(|s| s.verdict.is_accepted()).count();
    let mut periods: Vec<Period> = selections.iter().filter_map(|s| s.period).collect();
    periods.sort();
    periods.dedup();

    CategorySummary {
        category,
        retention,
        items: selections.len(),
        periods: periods.len(),
        accepted,
        rejected: selections.len() - accepted,
    }
}
