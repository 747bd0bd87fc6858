//! Prometheus metrics for scan progress and order-book latency.
//!
//! This module provides metrics for:
//! - Markets scanned and skipped (by reason)
//! - Opportunities found (by scan mode)
//! - Order book fetch latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Markets examined counter metric name.
pub const METRIC_MARKETS_SCANNED: &str = "markets_scanned_total";
/// Markets skipped counter metric name.
pub const METRIC_MARKETS_SKIPPED: &str = "markets_skipped_total";
/// Opportunities found counter metric name.
pub const METRIC_OPPORTUNITIES_FOUND: &str = "opportunities_found_total";
/// Order book fetch latency metric name.
pub const METRIC_ORDERBOOK_FETCH_LATENCY: &str = "orderbook_fetch_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_ORDERBOOK_FETCH_LATENCY,
        "Order book fetch latency in milliseconds"
    );

    describe_counter!(
        METRIC_MARKETS_SCANNED,
        "Total number of listed markets examined by a scan"
    );
    describe_counter!(
        METRIC_MARKETS_SKIPPED,
        "Total number of markets dropped by a scan, by reason"
    );
    describe_counter!(
        METRIC_OPPORTUNITIES_FOUND,
        "Total number of opportunities emitted, by scan mode"
    );

    debug!("Metrics initialized");
}

/// Record order book fetch latency.
pub fn record_orderbook_fetch_latency(start: Instant) {
    histogram!(METRIC_ORDERBOOK_FETCH_LATENCY).record(elapsed_ms(start));
}

/// Increment markets scanned counter.
pub fn inc_markets_scanned() {
    counter!(METRIC_MARKETS_SCANNED).increment(1);
}

/// Increment markets skipped counter for one reason.
pub fn inc_markets_skipped(reason: &'static str) {
    counter!(METRIC_MARKETS_SKIPPED, "reason" => reason).increment(1);
}

/// Increment opportunities found counter for one scan mode.
pub fn inc_opportunities_found(mode: &'static str) {
    counter!(METRIC_OPPORTUNITIES_FOUND, "mode" => mode).increment(1);
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn elapsed_ms_measures_time() {
        let start = Instant::now();
        sleep(Duration::from_millis(10));
        assert!(elapsed_ms(start) >= 9.0);
    }

    #[test]
    fn recording_without_recorder_is_a_no_op() {
        init_metrics();
        inc_markets_scanned();
        inc_markets_skipped("placeholder");
        inc_opportunities_found("active");
        record_orderbook_fetch_latency(Instant::now());
    }
}
