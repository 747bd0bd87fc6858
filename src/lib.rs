//! Polymarket market-making opportunity scanner.
//!
//! This library scans Polymarket's public REST API for markets worth quoting
//! and suggests prices and position sizes for them. It never places orders.
//!
//! # Scans
//!
//! Every scan lists the top markets by 24h volume, reads the order book of
//! each market's first outcome token, and keeps the markets matching one of
//! two filters:
//!
//! ```text
//! Illiquid: bid <= 0.01 and ask >= 0.99   -> quote 0.40 / 0.60
//! Active:   real quotes inside 5%-95%,
//!           spread >= MIN_SPREAD_PCT      -> quote mid ± TARGET_SPREAD_PCT/2
//! ```
//!
//! Illiquid ("dust") markets can further be categorized by keyword, priced
//! with fixed per-topic ranges, and sized with quarter Kelly.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Market listing types, source trait and Polymarket client
//! - [`orderbook`]: Order book types and top-of-book arithmetic
//! - [`scanner`]: Filters, opportunities and the scan loop
//! - [`pricing`]: Category classifier, pricing rules and position sizing
//! - [`report`]: Dust and active report building
//! - [`metrics`]: Prometheus metric names and recorders

pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod orderbook;
pub mod pricing;
pub mod report;
pub mod scanner;

pub use config::Config;
pub use error::{AppError, Result};
