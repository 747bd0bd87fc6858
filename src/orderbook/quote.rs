//! Top-of-book quote and the spread arithmetic built on it.

use rust_decimal::Decimal;

/// Best bid and best ask of one book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Best bid price.
    pub best_bid: Decimal,
    /// Best ask price.
    pub best_ask: Decimal,
}

impl Quote {
    /// Create a new quote.
    pub fn new(best_bid: Decimal, best_ask: Decimal) -> Self {
        Self { best_bid, best_ask }
    }

    /// Absolute spread (ask - bid).
    pub fn spread(&self) -> Decimal {
        self.best_ask - self.best_bid
    }

    /// Spread relative to the best bid; zero when the bid is not positive
    /// or the ratio does not fit in a `Decimal`.
    pub fn spread_pct(&self) -> Decimal {
        self.checked_spread_pct().unwrap_or_default()
    }

    /// Spread relative to the best bid, `None` on overflow.
    pub fn checked_spread_pct(&self) -> Option<Decimal> {
        let spread = self.best_ask.checked_sub(self.best_bid)?;
        if self.best_bid > Decimal::ZERO {
            spread.checked_div(self.best_bid)
        } else {
            Some(Decimal::ZERO)
        }
    }

    /// Midpoint between best bid and best ask.
    pub fn mid(&self) -> Decimal {
        mid_price(self.best_bid, self.best_ask)
    }

    /// Midpoint, `None` on overflow.
    pub fn checked_mid(&self) -> Option<Decimal> {
        Some(self.best_bid.checked_add(self.best_ask)? / Decimal::TWO)
    }
}

/// Midpoint of two prices.
pub fn mid_price(bid: Decimal, ask: Decimal) -> Decimal {
    (bid + ask) / Decimal::TWO
}

/// Parse a decimal price string from the API.
///
/// Empty text reads as zero. Scientific notation ("1e-3") is accepted.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Decimal::ZERO);
    }
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
