//! Fixed pricing rules for markets with no genuine quotes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::category::{contains_any, Category};

/// Suggested two-sided quote for a market, with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSuggestion {
    /// Price to bid at.
    pub bid: Decimal,
    /// Price to offer at.
    pub ask: Decimal,
    /// Human-readable reason, shown verbatim in reports.
    pub rationale: &'static str,
}

impl PriceSuggestion {
    const fn new(bid: Decimal, ask: Decimal, rationale: &'static str) -> Self {
        Self { bid, ask, rationale }
    }

    /// Midpoint of the suggested quote, used as the probability estimate.
    pub fn mid(&self) -> Decimal {
        crate::orderbook::mid_price(self.bid, self.ask)
    }

    /// Width of the suggested quote relative to its bid.
    pub fn spread_pct(&self) -> Decimal {
        (self.ask - self.bid) / self.bid
    }
}

const WEAK_NFL_TEAMS: &[&str] = &["browns", "titans", "jets", "raiders", "panthers", "giants"];
const STRONG_NFL_TEAMS: &[&str] = &["chiefs", "49ers", "ravens", "bills", "eagles"];
const RARE_POLITICAL_EVENTS: &[&str] = &["out in", "resign", "impeach", "remove"];

/// Suggest a bid/ask pair for a question in the given category.
pub fn price_for_category(question: &str, category: Category) -> PriceSuggestion {
    match category {
        Category::Sports => price_sports(question),
        Category::Politics => price_politics(question),
        Category::Economic => price_economic(question),
        Category::Unknown | Category::Longshot | Category::Competitive => PriceSuggestion::new(
            dec!(0.10),
            dec!(0.30),
            "Unknown category - using conservative wide spread (10-30%)",
        ),
    }
}

fn price_sports(question: &str) -> PriceSuggestion {
    let text = question.to_lowercase();

    if !text.contains("super bowl") {
        return PriceSuggestion::new(
            dec!(0.01),
            dec!(0.05),
            "Generic sports longshot - priced at 1-5%",
        );
    }

    // One of 32 teams: ~3% base rate, weak teams lower, contenders higher.
    if contains_any(&text, WEAK_NFL_TEAMS) {
        return PriceSuggestion::new(
            dec!(0.005),
            dec!(0.015),
            "Bad NFL team - priced at 0.5-1.5% (conservative longshot)",
        );
    }

    if contains_any(&text, STRONG_NFL_TEAMS) {
        return PriceSuggestion::new(
            dec!(0.08),
            dec!(0.12),
            "Good NFL team - priced at 8-12% (competitive odds)",
        );
    }

    PriceSuggestion::new(
        dec!(0.02),
        dec!(0.05),
        "Average NFL team - priced at 2-5% (base rate 1/32 teams)",
    )
}

fn price_politics(question: &str) -> PriceSuggestion {
    let text = question.to_lowercase();

    if text.contains("president") && text.contains("will") && text.contains("win") {
        return PriceSuggestion::new(
            dec!(0.05),
            dec!(0.15),
            "Presidential candidate in large field - priced at 5-15%",
        );
    }

    if text.contains("mayor") {
        return PriceSuggestion::new(
            dec!(0.10),
            dec!(0.25),
            "Mayoral candidate - priced at 10-25% (assume 4-5 competitive candidates)",
        );
    }

    if contains_any(&text, RARE_POLITICAL_EVENTS) {
        return PriceSuggestion::new(
            dec!(0.01),
            dec!(0.05),
            "Rare political event - priced at 1-5%",
        );
    }

    PriceSuggestion::new(
        dec!(0.15),
        dec!(0.35),
        "Generic political event - priced at 15-35%",
    )
}

fn price_economic(question: &str) -> PriceSuggestion {
    let text = question.to_lowercase();

    if text.contains("fed") && text.contains("increase") {
        if text.contains("2025") || text.contains("2026") {
            return PriceSuggestion::new(
                dec!(0.20),
                dec!(0.40),
                "Fed rate increase (future) - priced at 20-40%",
            );
        }
        return PriceSuggestion::new(
            dec!(0.30),
            dec!(0.50),
            "Fed rate increase - priced at 30-50%",
        );
    }

    if text.contains("recession") {
        return PriceSuggestion::new(
            dec!(0.15),
            dec!(0.35),
            "Recession prediction - priced at 15-35%",
        );
    }

    PriceSuggestion::new(
        dec!(0.25),
        dec!(0.45),
        "Generic economic event - priced at 25-45%",
    )
}
