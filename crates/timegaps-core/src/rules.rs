//! Retention rules and the rules string parser.
//!
//! A rules string is a comma-separated list of `<category><count>` tokens,
//! for example `days5,weeks4,months12,years5`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Category, RulesError, TokenFault};

/// How many items a category may keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// No limit.
    Unlimited,
    /// Keep at most this many.
    Keep(u32),
}

impl Retention {
    /// Check whether the item (or period) ranked `rank` (0 = newest) is kept.
    pub fn keeps(self, rank: usize) -> bool {
        match self {
            Retention::Unlimited => true,
            Retention::Keep(n) => rank < n as usize,
        }
    }
}

/// Parsed retention rules: an ordered mapping of category to count.
///
/// Only categories given explicitly are stored. Absent categories keep
/// nothing, except `recent`, which is unlimited unless given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: IndexMap<Category, u32>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rules string.
    pub fn parse(input: &str) -> Result<Self, RulesError> {
        if input.trim().is_empty() {
            return Err(RulesError::EmptyRules);
        }

        let mut rules = Self::new();
        for (index, raw) in input.split(',').enumerate() {
            let token = raw.trim();
            if token.is_empty() {
                return Err(RulesError::EmptyToken { position: index + 1 });
            }
            let (category, count) = parse_token(token)?;
            rules.insert(category, count)?;
        }
        Ok(rules)
    }

    /// Add a rule. Fails if the category already has one.
    pub fn insert(&mut self, category: Category, count: u32) -> Result<(), RulesError> {
        if self.rules.contains_key(&category) {
            return Err(RulesError::DuplicateCategory { category });
        }
        self.rules.insert(category, count);
        Ok(())
    }

    /// Add a rule, builder style.
    pub fn with(mut self, category: Category, count: u32) -> Result<Self, RulesError> {
        self.insert(category, count)?;
        Ok(self)
    }

    /// Retention for a category, applying the defaults for absent ones.
    pub fn retention(&self, category: Category) -> Retention {
        match self.rules.get(&category) {
            Some(&count) => Retention::Keep(count),
            None if category.is_recent() => Retention::Unlimited,
            None => Retention::Keep(0),
        }
    }

    /// Count for a category; absent categories count 0.
    ///
    /// Use [`RuleSet::retention`] to distinguish an unlimited `recent`.
    pub fn count(&self, category: Category) -> u32 {
        self.rules.get(&category).copied().unwrap_or(0)
    }

    /// Check if a category was given explicitly.
    pub fn is_explicit(&self, category: Category) -> bool {
        self.rules.contains_key(&category)
    }

    /// Explicit non-`recent` categories, smallest span first.
    pub fn timed_categories(&self) -> Vec<Category> {
        let mut timed: Vec<Category> = self
            .rules
            .keys()
            .copied()
            .filter(|c| !c.is_recent())
            .collect();
        timed.sort();
        timed
    }

    /// Explicit rules in the order given.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.rules.iter().map(|(&c, &n)| (c, n))
    }

    /// Number of explicit rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules were given.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for RuleSet {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (category, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{category}{count}")?;
        }
        Ok(())
    }
}

/// Split a non-empty token into category and count.
fn parse_token(token: &str) -> Result<(Category, u32), RulesError> {
    let split = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    let (name, digits) = token.split_at(split);

    let category = Category::from_str(name)
        .map_err(|_| RulesError::invalid(token, TokenFault::UnknownCategory(name.to_string())))?;

    if digits.is_empty() {
        return Err(RulesError::invalid(token, TokenFault::MissingCount));
    }

    let malformed = || RulesError::invalid(token, TokenFault::MalformedCount(digits.to_string()));
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let count = digits.parse::<u32>().map_err(|_| malformed())?;

    Ok((category, count))
}
