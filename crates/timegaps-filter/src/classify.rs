//! Assigning items to categories by age.

use serde::{Deserialize, Serialize};

use timegaps_core::{Category, RuleSet};

use crate::period::CATEGORY_TABLE;

/// Age bands of the configured categories.
///
/// Each configured category covers ages from its own boundary up to the
/// next configured boundary. Ages below the smallest boundary are `recent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundaries {
    /// `(boundary, category)` pairs, smallest boundary first.
    bands: Vec<(i64, Category)>,
}

impl Boundaries {
    /// Bands for the given categories. `recent` and repeats are ignored.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let wanted: Vec<Category> = categories.into_iter().collect();
        let bands = CATEGORY_TABLE
            .iter()
            .filter(|spec| wanted.contains(&spec.category))
            .map(|spec| (spec.boundary, spec.category))
            .collect();
        Self { bands }
    }

    /// Bands for the categories given explicitly in `rules`.
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(rules.timed_categories())
    }

    /// The smallest boundary, below which items are `recent`.
    pub fn smallest(&self) -> Option<i64> {
        self.bands.first().map(|&(boundary, _)| boundary)
    }

    /// Configured categories, smallest span first.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.bands.iter().map(|&(_, category)| category)
    }

    /// Category for an item of the given age in seconds.
    pub fn category_for_age(&self, age: i64) -> Category {
        if age < 0 {
            return Category::Recent;
        }
        self.bands
            .iter()
            .rev()
            .find(|&&(boundary, _)| age >= boundary)
            .map_or(Category::Recent, |&(_, category)| category)
    }
}

/// Classify an item modified at `modified` relative to `now`.
///
/// Items from the future are always `recent`. An age exactly on a boundary
/// belongs to that boundary's category.
pub fn classify(modified: i64, now: i64, boundaries: &Boundaries) -> Category {
    boundaries.category_for_age(now.saturating_sub(modified))
}
