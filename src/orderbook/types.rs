//! Order book types as served by the CLOB `/book` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::quote::{parse_price, Quote};

/// Single price level in an order book, kept as the decimal text the API sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level.
    #[serde(default)]
    pub price: String,
    /// Total size available at this price.
    #[serde(default)]
    pub size: String,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            size: size.into(),
        }
    }
}

/// Order book for one outcome token, best level first on each side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderBook {
    /// Market (condition) ID.
    #[serde(default)]
    pub market: Option<String>,
    /// Asset (token) ID.
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Bid levels, best first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub asks: Vec<PriceLevel>,
}

/// Why a book could not produce a top-of-book quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// One side of the book has no levels.
    #[error("order book has no {0}")]
    EmptySide(&'static str),

    /// A best price was not a decimal number.
    #[error("invalid {side} price {raw:?}")]
    InvalidPrice {
        /// "bid" or "ask".
        side: &'static str,
        /// The text the API sent.
        raw: String,
    },

    /// Spread or midpoint of the best prices does not fit in a `Decimal`.
    #[error("best prices out of range (bid {best_bid}, ask {best_ask})")]
    OutOfRange {
        /// Best bid.
        best_bid: Decimal,
        /// Best ask.
        best_ask: Decimal,
    },
}

impl OrderBook {
    /// Check whether either side is empty.
    pub fn is_one_sided(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }

    /// Parse the best bid and best ask.
    pub fn best_quote(&self) -> Result<Quote, BookError> {
        let bid = self.bids.first().ok_or(BookError::EmptySide("bids"))?;
        let ask = self.asks.first().ok_or(BookError::EmptySide("asks"))?;

        let best_bid = parse_price(&bid.price).ok_or_else(|| BookError::InvalidPrice {
            side: "bid",
            raw: bid.price.clone(),
        })?;
        let best_ask = parse_price(&ask.price).ok_or_else(|| BookError::InvalidPrice {
            side: "ask",
            raw: ask.price.clone(),
        })?;

        let quote = Quote::new(best_bid, best_ask);
        if quote.checked_spread_pct().is_none() || quote.checked_mid().is_none() {
            return Err(BookError::OutOfRange { best_bid, best_ask });
        }

        Ok(quote)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PriceLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PriceLevel>>::deserialize(deserializer)?.unwrap_or_default())
}
