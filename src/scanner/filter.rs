//! Liquidity and spread predicates applied to a book's top of book.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::orderbook::Quote;

/// Highest best bid that still counts as the API's "no quotes" placeholder.
pub const PLACEHOLDER_MAX_BID: Decimal = dec!(0.01);
/// Lowest best ask that still counts as the API's "no quotes" placeholder.
pub const PLACEHOLDER_MIN_ASK: Decimal = dec!(0.99);

/// Books bidding below this are too close to resolving NO to quote.
pub const EXTREME_MIN_BID: Decimal = dec!(0.05);
/// Books offering above this are too close to resolving YES to quote.
pub const EXTREME_MAX_ASK: Decimal = dec!(0.95);

/// Why a usable book was left out of a scan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRejection {
    /// Illiquid scan: the book carries real quotes.
    #[error("book has genuine quotes")]
    HasQuotes,

    /// Active scan: the book is the placeholder pattern.
    #[error("placeholder book")]
    Placeholder,

    /// Active scan: the market is priced near 0 or 1.
    #[error("extreme probability (bid {best_bid}, ask {best_ask})")]
    ExtremeProbability {
        /// Best bid.
        best_bid: Decimal,
        /// Best ask.
        best_ask: Decimal,
    },

    /// Active scan: not enough room between bid and ask.
    #[error("spread {spread_pct} below minimum {min_spread_pct}")]
    SpreadTooNarrow {
        /// Observed relative spread.
        spread_pct: Decimal,
        /// Configured minimum.
        min_spread_pct: Decimal,
    },
}

impl FilterRejection {
    /// Short label used as a metrics dimension.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HasQuotes => "has_quotes",
            Self::Placeholder => "placeholder",
            Self::ExtremeProbability { .. } => "extreme_probability",
            Self::SpreadTooNarrow { .. } => "spread_too_narrow",
        }
    }
}

/// Check for the 0.01 / 0.99 (or wider) pattern the API shows for unquoted markets.
pub fn is_placeholder(quote: &Quote) -> bool {
    quote.best_bid <= PLACEHOLDER_MAX_BID && quote.best_ask >= PLACEHOLDER_MIN_ASK
}

/// Check whether either side sits outside the 5% / 95% band.
pub fn is_extreme(quote: &Quote) -> bool {
    quote.best_bid < EXTREME_MIN_BID || quote.best_ask > EXTREME_MAX_ASK
}

/// Accept only placeholder books.
pub fn check_illiquid(quote: &Quote) -> Result<(), FilterRejection> {
    if is_placeholder(quote) {
        Ok(())
    } else {
        Err(FilterRejection::HasQuotes)
    }
}

/// Accept books with genuine, non-extreme quotes at least `min_spread_pct` wide.
pub fn check_active(quote: &Quote, min_spread_pct: Decimal) -> Result<(), FilterRejection> {
    if is_placeholder(quote) {
        return Err(FilterRejection::Placeholder);
    }

    if is_extreme(quote) {
        return Err(FilterRejection::ExtremeProbability {
            best_bid: quote.best_bid,
            best_ask: quote.best_ask,
        });
    }

    let spread_pct = quote.spread_pct();
    if spread_pct < min_spread_pct {
        return Err(FilterRejection::SpreadTooNarrow {
            spread_pct,
            min_spread_pct,
        });
    }

    Ok(())
}
