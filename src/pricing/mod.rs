//! Pricing module for quoting markets without genuine liquidity.
//!
//! This module handles:
//! - Topic classification of market questions
//! - Rule-based bid/ask suggestions per topic
//! - Fractional-Kelly position sizing

pub mod category;
pub mod rules;
pub mod sizing;

pub use category::{categorize, Category};
pub use rules::{price_for_category, PriceSuggestion};
pub use sizing::{kelly_fraction, suggest_position_size, PositionSize};
