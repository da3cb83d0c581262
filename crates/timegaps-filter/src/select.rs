//! Per-category selection of items to keep.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use timegaps_core::{Category, Retention};

use crate::period::{Period, spec_for};

/// Why an item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// A newer item represents the same period.
    Duplicate,
    /// Beyond the number of periods (or recent items) kept.
    OutOfRange,
}

/// Outcome for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "reason")]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    /// Check if the item is kept.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// An item handed to the selector: its input position and timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub modified: i64,
}

/// Selector output for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub period: Option<Period>,
    pub verdict: Verdict,
}

/// Select the candidates of one category.
///
/// Candidates are grouped by period. Within a period only the newest item
/// (earliest input position on equal timestamps) can be kept; the others
/// are duplicates. Periods are ranked newest first and the representatives
/// of the first `retention` periods are accepted.
///
/// `recent` has no periods and is handled by [`select_recent`].
pub fn select_periods(
    candidates: &[Candidate],
    category: Category,
    retention: Retention,
) -> Vec<Selection> {
    let Some(spec) = spec_for(category) else {
        return select_recent(candidates, retention);
    };

    let mut groups: BTreeMap<Period, Vec<Candidate>> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry((spec.period_of)(candidate.modified))
            .or_default()
            .push(*candidate);
    }

    let mut selections = Vec::with_capacity(candidates.len());
    for (rank, (period, members)) in groups.into_iter().rev().enumerate() {
        let representative = members
            .iter()
            .max_by_key(|c| (c.modified, Reverse(c.index)))
            .map(|c| c.index);

        for member in members {
            let verdict = if Some(member.index) != representative {
                Verdict::Rejected(RejectReason::Duplicate)
            } else if retention.keeps(rank) {
                Verdict::Accepted
            } else {
                Verdict::Rejected(RejectReason::OutOfRange)
            };
            selections.push(Selection {
                index: member.index,
                period: Some(period),
                verdict,
            });
        }
    }
    selections
}

/// Select `recent` candidates: the newest `retention` items are kept.
pub fn select_recent(candidates: &[Candidate], retention: Retention) -> Vec<Selection> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|c| (Reverse(c.modified), c.index));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, c)| Selection {
            index: c.index,
            period: None,
            verdict: if retention.keeps(rank) {
                Verdict::Accepted
            } else {
                Verdict::Rejected(RejectReason::OutOfRange)
            },
        })
        .collect()
}
