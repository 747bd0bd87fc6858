//! Mock market source for unit testing.
//!
//! This module provides an in-memory market source that can be used in tests
//! without making real network requests.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::MarketError;
use crate::orderbook::{OrderBook, PriceLevel};

use super::source::MarketSource;
use super::types::Market;

/// Configuration for mock source behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail the market listing.
    pub fail_listing: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// In-memory market source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockMarketSource {
    /// Mock configuration.
    config: MockConfig,
    /// Listed markets, in listing order.
    markets: Arc<Mutex<Vec<Market>>>,
    /// Order books by token ID.
    order_books: Arc<Mutex<HashMap<String, OrderBook>>>,
    /// Token IDs whose book request fails.
    failing_tokens: Arc<Mutex<HashSet<String>>>,
    /// Token IDs requested so far, in order.
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockMarketSource {
    /// Create a new mock source with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Append a market to the listing.
    pub fn add_market(&self, market: Market) {
        self.markets.lock().unwrap().push(market);
    }

    /// Set the order book served for a token.
    pub fn set_order_book(&self, token_id: impl Into<String>, book: OrderBook) {
        self.order_books
            .lock()
            .unwrap()
            .insert(token_id.into(), book);
    }

    /// Make book requests for a token fail.
    pub fn fail_token(&self, token_id: impl Into<String>) {
        self.failing_tokens.lock().unwrap().insert(token_id.into());
    }

    /// Token IDs whose books were requested, in request order.
    pub fn requested_tokens(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl MarketSource for MockMarketSource {
    async fn list_markets(&self, limit: usize) -> Result<Vec<Market>, MarketError> {
        self.simulate_latency().await;

        if self.config.fail_listing {
            return Err(MarketError::FetchFailed {
                resource: "markets".to_string(),
                reason: "Mock listing failure".to_string(),
            });
        }

        let markets = self.markets.lock().unwrap();
        Ok(markets.iter().take(limit).cloned().collect())
    }

    async fn get_order_book(&self, token_id: &str) -> Result<OrderBook, MarketError> {
        self.simulate_latency().await;
        self.requests.lock().unwrap().push(token_id.to_string());

        if self.failing_tokens.lock().unwrap().contains(token_id) {
            return Err(MarketError::FetchFailed {
                resource: format!("book {}", token_id),
                reason: "Mock order book failure".to_string(),
            });
        }

        self.order_books
            .lock()
            .unwrap()
            .get(token_id)
            .cloned()
            .ok_or_else(|| MarketError::FetchFailed {
                resource: format!("book {}", token_id),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }
}

/// Builder for listing entries.
pub struct MockMarketBuilder {
    market: Market,
}

impl MockMarketBuilder {
    /// Start a market with the given question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            market: Market {
                question: question.into(),
                active: true,
                ..Market::default()
            },
        }
    }

    /// Set the token ids, encoded the way Gamma sends them.
    pub fn tokens(mut self, token_ids: &[&str]) -> Self {
        // A string slice list always serializes.
        let encoded = serde_json::to_string(token_ids).unwrap_or_default();
        self.market.clob_token_ids = Some(encoded);
        self
    }

    /// Set the raw `clobTokenIds` text.
    pub fn raw_tokens(mut self, raw: impl Into<String>) -> Self {
        self.market.clob_token_ids = Some(raw.into());
        self
    }

    /// Set the 24h volume.
    pub fn volume(mut self, volume: Decimal) -> Self {
        self.market.volume_24hr = volume;
        self
    }

    /// Mark the market closed.
    pub fn closed(mut self) -> Self {
        self.market.closed = true;
        self.market.active = false;
        self
    }

    /// Build the market.
    pub fn build(self) -> Market {
        self.market
    }
}

/// Builder for creating mock order books with common patterns.
pub struct MockOrderBookBuilder {
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl MockOrderBookBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Add a bid level. Levels are served in insertion order.
    pub fn bid(mut self, price: &str, size: &str) -> Self {
        self.bids.push(PriceLevel::new(price, size));
        self
    }

    /// Add an ask level. Levels are served in insertion order.
    pub fn ask(mut self, price: &str, size: &str) -> Self {
        self.asks.push(PriceLevel::new(price, size));
        self
    }

    /// One level per side at the given prices.
    pub fn with_quote(self, best_bid: &str, best_ask: &str) -> Self {
        self.bid(best_bid, "100").ask(best_ask, "100")
    }

    /// The 0.001 / 0.999 book the API shows for markets nobody quotes.
    pub fn placeholder(self) -> Self {
        self.with_quote("0.001", "0.999")
    }

    /// Build the mock order book.
    pub fn build(self) -> OrderBook {
        OrderBook {
            market: None,
            asset_id: None,
            bids: self.bids,
            asks: self.asks,
        }
    }
}

impl Default for MockOrderBookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn mock_source_lists_markets_in_order_up_to_limit() {
        let source = MockMarketSource::new();
        for q in ["A", "B", "C"] {
            source.add_market(MockMarketBuilder::new(q).tokens(&["1"]).build());
        }

        let markets = source.list_markets(2).await.unwrap();
        let questions: Vec<_> = markets.iter().map(|m| m.question.as_str()).collect();
        assert_eq!(questions, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn mock_source_serves_and_records_books() {
        let source = MockMarketSource::new();
        source.set_order_book(
            "token-123",
            MockOrderBookBuilder::new().with_quote("0.48", "0.52").build(),
        );

        let book = source.get_order_book("token-123").await.unwrap();
        assert_eq!(book.bids[0].price, "0.48");
        assert!(source.get_order_book("unknown").await.is_err());
        assert_eq!(source.requested_tokens(), vec!["token-123", "unknown"]);
    }

    #[tokio::test]
    async fn mock_source_failure_modes() {
        let source = MockMarketSource::with_config(MockConfig {
            fail_listing: true,
            ..Default::default()
        });
        assert!(source.list_markets(10).await.is_err());

        let source = MockMarketSource::new();
        source.set_order_book("t", MockOrderBookBuilder::new().placeholder().build());
        source.fail_token("t");
        assert!(source.get_order_book("t").await.is_err());
    }

    #[test]
    fn market_builder_encodes_token_ids() {
        let market = MockMarketBuilder::new("Q")
            .tokens(&["111", "222"])
            .volume(dec!(10))
            .build();

        assert_eq!(market.clob_token_ids.as_deref(), Some(r#"["111","222"]"#));
        assert_eq!(market.yes_token_id().as_deref(), Some("111"));
        assert_eq!(market.volume_24hr, dec!(10));
        assert!(!market.closed);
        assert!(MockMarketBuilder::new("Q").closed().build().closed);
    }
}
