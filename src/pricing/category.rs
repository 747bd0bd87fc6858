//! Keyword-based topic classification of market questions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Topic of a market, derived from its question text.
///
/// `Longshot` and `Competitive` are never produced by [`categorize`]; they
/// price like `Unknown`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    /// No keyword matched.
    #[default]
    Unknown,
    /// Sports outcomes (Super Bowl, championships, ...).
    Sports,
    /// Elections and political events.
    Politics,
    /// Fed rates, inflation and other macro events.
    Economic,
    /// Very unlikely events (< 5%).
    Longshot,
    /// Events in the 40-60% range.
    Competitive,
}

/// Checked first, so "win" claims questions that also match "win the".
const SPORTS_KEYWORDS: &[&str] = &[
    "super bowl",
    "win",
    "championship",
    "nfl",
    "nba",
    "mlb",
    "soccer",
    "world cup",
];

const POLITICS_KEYWORDS: &[&str] = &[
    "election",
    "president",
    "mayor",
    "senator",
    "win the",
    "elected",
];

const ECONOMIC_KEYWORDS: &[&str] = &[
    "fed",
    "interest rate",
    "inflation",
    "gdp",
    "recession",
    "unemployment",
];

/// Classify a question by case-insensitive keyword containment.
///
/// Lists are checked Sports, then Politics, then Economic; the first hit wins.
pub fn categorize(question: &str) -> Category {
    let text = question.to_lowercase();

    [
        (Category::Sports, SPORTS_KEYWORDS),
        (Category::Politics, POLITICS_KEYWORDS),
        (Category::Economic, ECONOMIC_KEYWORDS),
    ]
    .into_iter()
    .find(|(_, keywords)| contains_any(&text, keywords))
    .map(|(category, _)| category)
    .unwrap_or(Category::Unknown)
}

/// Check whether lower-cased `text` contains any of `keywords`.
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
