//! Fractional-Kelly position sizing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::orderbook::mid_price;

/// Multiplier applied to full Kelly.
pub const KELLY_MULTIPLIER: Decimal = dec!(0.25);

/// Largest bankroll fraction ever suggested.
pub const MAX_KELLY_FRACTION: Decimal = dec!(0.10);

/// Smallest position suggested, in dollars.
pub const MIN_POSITION_SIZE: Decimal = dec!(5);

/// Largest position suggested, in dollars.
pub const MAX_POSITION_SIZE: Decimal = dec!(50);

/// Suggested dollar size per side, with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSize {
    /// Dollars to commit on the bid.
    pub buy_size: Decimal,
    /// Dollars to commit on the offer.
    pub sell_size: Decimal,
    /// Human-readable reason, shown verbatim in reports.
    pub rationale: &'static str,
}

impl PositionSize {
    fn symmetric(size: Decimal, rationale: &'static str) -> Self {
        Self {
            buy_size: size,
            sell_size: size,
            rationale,
        }
    }

    /// Mean of the two sides.
    pub fn per_side(&self) -> Decimal {
        (self.buy_size + self.sell_size) / Decimal::TWO
    }
}

/// Bankroll fraction to risk on a binary contract priced at `market_mid`
/// when the true probability is believed to be `true_probability`.
///
/// Returns zero when there is no edge (`p <= m`), when `p` is outside (0, 1),
/// or when `m` is not a positive price. Otherwise quarter Kelly capped at 10%.
pub fn kelly_fraction(true_probability: Decimal, market_mid: Decimal) -> Decimal {
    let p = true_probability;
    let m = market_mid;

    if p <= m || p <= Decimal::ZERO || p >= Decimal::ONE || m <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    // Payout odds on a contract bought at m.
    let b = (Decimal::ONE - m) / m;
    let q = Decimal::ONE - p;
    let kelly = (b * p - q) / b;

    (kelly * KELLY_MULTIPLIER).min(MAX_KELLY_FRACTION)
}

/// Suggest equal buy/sell dollar sizes for quoting a market at `market_bid`/`market_ask`.
pub fn suggest_position_size(
    bankroll: Decimal,
    estimated_probability: Decimal,
    market_bid: Decimal,
    market_ask: Decimal,
) -> PositionSize {
    let fraction = kelly_fraction(estimated_probability, mid_price(market_bid, market_ask));
    let size = bankroll * fraction;

    if size < MIN_POSITION_SIZE {
        return PositionSize::symmetric(
            MIN_POSITION_SIZE,
            "Using minimum size ($5) - Kelly suggests lower but testing requires minimum capital",
        );
    }

    if size > MAX_POSITION_SIZE {
        return PositionSize::symmetric(
            MAX_POSITION_SIZE,
            "Capped at $50 - dust markets are too risky for larger positions",
        );
    }

    PositionSize::symmetric(size, "Kelly criterion sizing with 1/4 Kelly for safety")
}
