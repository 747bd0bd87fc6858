//! Report building on top of scan output.
//!
//! Everything here is pure; printing lives in the binary.

use rust_decimal::Decimal;

use crate::pricing::{
    categorize, price_for_category, suggest_position_size, Category, PositionSize, PriceSuggestion,
};
use crate::scanner::Opportunity;

/// Category order of the dust report.
pub const DUST_CATEGORY_ORDER: [Category; 4] = [
    Category::Sports,
    Category::Politics,
    Category::Economic,
    Category::Unknown,
];

/// Heading printed for a dust report group.
pub fn dust_category_label(category: Category) -> &'static str {
    match category {
        Category::Sports => "SPORTS LONGSHOTS",
        Category::Politics => "POLITICAL EVENTS",
        Category::Economic => "ECONOMIC EVENTS",
        Category::Unknown | Category::Longshot | Category::Competitive => "UNCATEGORIZED",
    }
}

/// An illiquid opportunity priced and sized by the dust rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DustEntry {
    /// The placeholder market.
    pub opportunity: Opportunity,
    /// Topic derived from the question.
    pub category: Category,
    /// Suggested quote for the topic.
    pub pricing: PriceSuggestion,
    /// Probability assumed for sizing (midpoint of the suggested quote).
    pub estimated_probability: Decimal,
    /// Suggested size per side.
    pub sizing: PositionSize,
}

impl DustEntry {
    /// Categorize, price and size one illiquid opportunity.
    pub fn analyze(opportunity: Opportunity, bankroll: Decimal) -> Self {
        let category = categorize(&opportunity.question);
        let pricing = price_for_category(&opportunity.question, category);
        let estimated_probability = pricing.mid();
        let sizing = suggest_position_size(bankroll, estimated_probability, pricing.bid, pricing.ask);

        Self {
            opportunity,
            category,
            pricing,
            estimated_probability,
            sizing,
        }
    }

    /// Pricing and sizing rationale, joined.
    pub fn rationale(&self) -> String {
        format!("{} | {}", self.pricing.rationale, self.sizing.rationale)
    }

    /// Dollars per side.
    pub fn position_size(&self) -> Decimal {
        self.sizing.per_side()
    }

    /// Width of our suggested quote relative to its bid.
    pub fn our_spread_pct(&self) -> Decimal {
        self.pricing.spread_pct()
    }
}

/// Analyze every opportunity, preserving order.
pub fn analyze_dust(opportunities: Vec<Opportunity>, bankroll: Decimal) -> Vec<DustEntry> {
    opportunities
        .into_iter()
        .map(|opp| DustEntry::analyze(opp, bankroll))
        .collect()
}

/// Dust entries of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DustGroup {
    /// Category of every entry.
    pub category: Category,
    /// Heading for the group.
    pub label: &'static str,
    /// Entries of this category before truncation.
    pub total: usize,
    /// First `limit` entries, in scan order.
    pub entries: Vec<DustEntry>,
}

/// Group entries by category in [`DUST_CATEGORY_ORDER`], keeping up to `limit`
/// per group. Empty groups are left out.
pub fn group_by_category(entries: &[DustEntry], limit: usize) -> Vec<DustGroup> {
    DUST_CATEGORY_ORDER
        .iter()
        .filter_map(|&category| {
            let matching: Vec<&DustEntry> =
                entries.iter().filter(|e| e.category == category).collect();
            if matching.is_empty() {
                return None;
            }

            Some(DustGroup {
                category,
                label: dust_category_label(category),
                total: matching.len(),
                entries: matching.into_iter().take(limit).cloned().collect(),
            })
        })
        .collect()
}

/// Totals across an active scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveSummary {
    /// Number of opportunities.
    pub count: usize,
    /// Sum of 24h volume.
    pub total_volume: Decimal,
    /// Mean book spread (fraction, not percent).
    pub average_spread_pct: Decimal,
}

impl ActiveSummary {
    /// Summarize a scan's opportunities.
    pub fn from_opportunities(opportunities: &[Opportunity]) -> Self {
        if opportunities.is_empty() {
            return Self::default();
        }

        let count = opportunities.len();
        let total_volume = opportunities.iter().map(|o| o.volume).sum();
        let spread_sum: Decimal = opportunities.iter().map(|o| o.spread_pct).sum();

        Self {
            count,
            total_volume,
            average_spread_pct: spread_sum / Decimal::from(count),
        }
    }
}
