//! Polymarket REST client for the Gamma listing and CLOB book endpoints.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::MarketError;
use crate::orderbook::OrderBook;

use super::source::MarketSource;
use super::types::Market;

/// Plain request/response client over the public Polymarket APIs.
#[derive(Debug, Clone)]
pub struct PolymarketClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for the Gamma API.
    gamma_url: String,
    /// Base URL for the CLOB API.
    clob_url: String,
}

impl PolymarketClient {
    /// Create a client from config.
    pub fn new(config: &Config) -> Result<Self, MarketError> {
        Self::with_urls(
            &config.gamma_api_url,
            &config.clob_api_url,
            config.http_timeout(),
        )
    }

    /// Create a client against explicit base URLs.
    pub fn with_urls(
        gamma_url: &str,
        clob_url: &str,
        timeout: Duration,
    ) -> Result<Self, MarketError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            gamma_url: gamma_url.trim_end_matches('/').to_string(),
            clob_url: clob_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch open markets ordered by 24h volume, descending.
    #[instrument(skip(self))]
    pub async fn fetch_markets(&self, limit: usize) -> Result<Vec<Market>, MarketError> {
        let url = format!("{}/markets", self.gamma_url);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("limit", limit.as_str()),
                ("closed", "false"),
                ("order", "volume24hr"),
                ("ascending", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                resource: "markets".to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let markets: Vec<Market> = response.json().await.map_err(|e| {
            MarketError::ParseError(format!("Failed to parse market listing: {}", e))
        })?;

        debug!(count = markets.len(), "Fetched market listing");
        Ok(markets)
    }

    /// Get order book for a token.
    #[instrument(skip(self), fields(token_id = %token_id))]
    pub async fn fetch_order_book(&self, token_id: &str) -> Result<OrderBook, MarketError> {
        let url = format!("{}/book", self.clob_url);

        let response = self
            .http
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                resource: format!("book {}", token_id),
                reason: format!("HTTP {}", response.status()),
            });
        }

        response.json().await.map_err(|e| {
            MarketError::ParseError(format!("Failed to parse order book: {}", e))
        })
    }
}

impl MarketSource for PolymarketClient {
    async fn list_markets(&self, limit: usize) -> Result<Vec<Market>, MarketError> {
        self.fetch_markets(limit).await
    }

    async fn get_order_book(&self, token_id: &str) -> Result<OrderBook, MarketError> {
        self.fetch_order_book(token_id).await
    }
}
