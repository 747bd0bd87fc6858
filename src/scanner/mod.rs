//! Scanner module for finding markets worth quoting.
//!
//! This module handles:
//! - Placeholder, extreme-probability and spread filters
//! - Opportunity records and suggested prices
//! - The sequential listing/order-book scan

pub mod filter;
pub mod opportunity;
pub mod scan;

pub use filter::{check_active, check_illiquid, is_extreme, is_placeholder, FilterRejection};
pub use opportunity::{Opportunity, ScanMode, ILLIQUID_BUY_PRICE, ILLIQUID_SELL_PRICE};
pub use scan::{OpportunityScanner, ScanConfig, ScanReport, ScanStats};
