//! Market module for Polymarket listings.
//!
//! This module handles:
//! - Market types decoded from the Gamma API
//! - The `MarketSource` seam the scanner reads through
//! - Polymarket REST client
//! - Mock source for testing

pub mod client;
pub mod mock;
pub mod source;
pub mod types;

pub use client::PolymarketClient;
pub use mock::{MockConfig, MockMarketBuilder, MockMarketSource, MockOrderBookBuilder};
pub use source::MarketSource;
pub use types::Market;
