//! The seam between the scanner and wherever market data comes from.

use crate::error::MarketError;
use crate::orderbook::OrderBook;

use super::types::Market;

/// Read-only access to market listings and order books.
///
/// Implemented by [`PolymarketClient`](super::PolymarketClient) for the live
/// API and by [`MockMarketSource`](super::MockMarketSource) for tests.
#[allow(async_fn_in_trait)]
pub trait MarketSource {
    /// List up to `limit` open markets, highest 24h volume first.
    async fn list_markets(&self, limit: usize) -> Result<Vec<Market>, MarketError>;

    /// Fetch the order book for one outcome token.
    async fn get_order_book(&self, token_id: &str) -> Result<OrderBook, MarketError>;
}
