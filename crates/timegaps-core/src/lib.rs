//! Core types for timegaps.
//!
//! This crate provides the data structures shared by the filter engine,
//! the item collector and the command line: time categories, items,
//! parsed retention rules, configuration and error types.

mod category;
mod config;
mod error;
mod item;
mod rules;

pub use category::Category;
pub use config::{CollectConfig, CollectConfigBuilder, CollectConfigBuilderError, TimeSource};
pub use error::{RulesError, ScanError, TokenFault};
pub use item::{Item, unix_seconds};
pub use rules::{Retention, RuleSet};
