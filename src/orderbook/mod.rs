//! Order book module for top-of-book data.
//!
//! This module handles:
//! - Order book wire types from the CLOB API
//! - Best bid/ask extraction and price parsing
//! - Spread and midpoint calculations

pub mod quote;
pub mod types;

pub use quote::{mid_price, parse_price, Quote};
pub use types::{BookError, OrderBook, PriceLevel};
