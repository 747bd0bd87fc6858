//! Unified error types for the scanner.

use thiserror::Error;

/// Unified error type for the scanner application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scan aborted.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Market source error outside of a scan.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a market source (listing and order-book endpoints).
#[derive(Error, Debug)]
pub enum MarketError {
    /// The endpoint answered with a non-success status.
    #[error("failed to fetch {resource}: {reason}")]
    FetchFailed {
        /// What was being fetched (e.g. "markets", "book 1234").
        resource: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to decode the response body.
    #[error("failed to parse market data: {0}")]
    ParseError(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Errors that abort a whole scan.
///
/// Failures on individual markets never surface here; they only skip the
/// offending market.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The initial market listing could not be fetched or decoded.
    #[error("market listing failed: {0}")]
    Listing(#[source] MarketError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
