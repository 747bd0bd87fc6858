//! Single-pass sequential scan over the market listing.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use super::filter::{check_active, check_illiquid, FilterRejection};
use super::opportunity::{Opportunity, ScanMode};
use crate::error::{MarketError, ScanError};
use crate::market::{Market, MarketSource};
use crate::metrics;
use crate::orderbook::{BookError, OrderBook};

/// Parameters of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Minimum relative spread for the active scan.
    pub min_spread_pct: Decimal,
    /// Width of suggested quotes in the active scan.
    pub target_spread_pct: Decimal,
    /// Number of markets requested from the listing.
    pub max_markets: usize,
    /// Pause after every order book request.
    pub throttle: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_spread_pct: Decimal::new(2, 3),
            target_spread_pct: Decimal::new(1, 3),
            max_markets: 100,
            throttle: Duration::from_millis(50),
        }
    }
}

/// Per-scan counters, one bucket per way a market can drop out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Markets returned by the listing.
    pub listed: usize,
    /// Skipped because the market is closed.
    pub closed: usize,
    /// Skipped because token ids were missing or malformed.
    pub bad_token_ids: usize,
    /// Skipped because the book request failed.
    pub fetch_failed: usize,
    /// Skipped because the book had an empty side or a non-numeric price.
    pub unusable_book: usize,
    /// Usable books that did not pass the scan's filter.
    pub filtered: usize,
    /// Opportunities emitted.
    pub opportunities: usize,
}

impl ScanStats {
    /// Markets that produced no opportunity.
    pub fn skipped(&self) -> usize {
        self.closed + self.bad_token_ids + self.fetch_failed + self.unusable_book + self.filtered
    }

    fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Closed => self.closed += 1,
            SkipReason::TokenIds(_) | SkipReason::NoTokenIds => self.bad_token_ids += 1,
            SkipReason::OrderBook(_) => self.fetch_failed += 1,
            SkipReason::Book(_) => self.unusable_book += 1,
            SkipReason::Filtered(_) => self.filtered += 1,
        }
    }
}

/// Outcome of one scan pass.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Filter that was applied.
    pub mode: ScanMode,
    /// Opportunities in listing order.
    pub opportunities: Vec<Opportunity>,
    /// Skip counters.
    pub stats: ScanStats,
    /// When the pass finished.
    pub completed_at: OffsetDateTime,
}

/// Why a single market produced no opportunity. Never surfaced as an error.
#[derive(Error, Debug)]
enum SkipReason {
    #[error("market closed")]
    Closed,

    #[error("malformed token ids: {0}")]
    TokenIds(#[source] serde_json::Error),

    #[error("no token ids")]
    NoTokenIds,

    #[error("order book fetch failed: {0}")]
    OrderBook(#[source] MarketError),

    #[error("{0}")]
    Book(#[from] BookError),

    #[error("{0}")]
    Filtered(#[from] FilterRejection),
}

impl SkipReason {
    fn label(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::TokenIds(_) | Self::NoTokenIds => "bad_token_ids",
            Self::OrderBook(_) => "fetch_failed",
            Self::Book(_) => "unusable_book",
            Self::Filtered(rejection) => rejection.label(),
        }
    }
}

/// Walks the listing one market at a time and keeps those matching a [`ScanMode`].
pub struct OpportunityScanner<S> {
    source: S,
    config: ScanConfig,
}

impl<S: MarketSource> OpportunityScanner<S> {
    /// Create a scanner over a market source.
    pub fn new(source: S, config: ScanConfig) -> Self {
        Self { source, config }
    }

    /// Markets whose book is the placeholder pattern, quoted at 0.40 / 0.60.
    pub async fn scan_illiquid(&self) -> Result<Vec<Opportunity>, ScanError> {
        Ok(self.scan(ScanMode::Illiquid).await?.opportunities)
    }

    /// Genuinely quoted markets with room to quote inside the spread.
    pub async fn scan_active(&self) -> Result<Vec<Opportunity>, ScanError> {
        Ok(self.scan(ScanMode::Active).await?.opportunities)
    }

    /// Run one pass. Only a failed listing aborts; every per-market failure
    /// just drops that market.
    #[instrument(skip_all, fields(mode = %mode))]
    pub async fn scan(&self, mode: ScanMode) -> Result<ScanReport, ScanError> {
        let markets = self
            .source
            .list_markets(self.config.max_markets)
            .await
            .map_err(ScanError::Listing)?;

        info!(markets = markets.len(), "Scanning markets");

        let mut stats = ScanStats {
            listed: markets.len(),
            ..ScanStats::default()
        };
        let mut opportunities = Vec::new();

        for market in &markets {
            metrics::inc_markets_scanned();

            match self.evaluate(market, mode).await {
                Ok(opportunity) => {
                    debug!(
                        question = %opportunity.question,
                        best_bid = %opportunity.best_bid,
                        best_ask = %opportunity.best_ask,
                        "Opportunity found"
                    );
                    metrics::inc_opportunities_found(mode.label());
                    opportunities.push(opportunity);
                }
                Err(reason) => {
                    debug!(question = %market.question, reason = %reason, "Skipping market");
                    metrics::inc_markets_skipped(reason.label());
                    stats.record_skip(&reason);
                }
            }
        }

        stats.opportunities = opportunities.len();

        info!(
            opportunities = stats.opportunities,
            skipped = stats.skipped(),
            "Scan complete"
        );

        Ok(ScanReport {
            mode,
            opportunities,
            stats,
            completed_at: OffsetDateTime::now_utc(),
        })
    }

    async fn evaluate(&self, market: &Market, mode: ScanMode) -> Result<Opportunity, SkipReason> {
        if market.closed {
            return Err(SkipReason::Closed);
        }

        let token_id = market
            .token_ids()
            .map_err(SkipReason::TokenIds)?
            .into_iter()
            .next()
            .ok_or(SkipReason::NoTokenIds)?;

        let book = self
            .fetch_book(&token_id)
            .await
            .map_err(SkipReason::OrderBook)?;
        let quote = book.best_quote()?;

        let opportunity = match mode {
            ScanMode::Illiquid => {
                check_illiquid(&quote)?;
                Opportunity::illiquid(market, token_id, quote)
            }
            ScanMode::Active => {
                check_active(&quote, self.config.min_spread_pct)?;
                Opportunity::active(market, token_id, quote, self.config.target_spread_pct)
            }
        };

        Ok(opportunity)
    }

    /// Fetch one book, then wait out the throttle whether or not it succeeded.
    async fn fetch_book(&self, token_id: &str) -> Result<OrderBook, MarketError> {
        let start = Instant::now();
        let result = self.source.get_order_book(token_id).await;
        metrics::record_orderbook_fetch_latency(start);

        if !self.config.throttle.is_zero() {
            tokio::time::sleep(self.config.throttle).await;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{MockConfig, MockMarketBuilder, MockMarketSource, MockOrderBookBuilder};
    use crate::scanner::filter::{PLACEHOLDER_MAX_BID, PLACEHOLDER_MIN_ASK};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn config() -> ScanConfig {
        ScanConfig {
            throttle: Duration::ZERO,
            ..ScanConfig::default()
        }
    }

    fn add(source: &MockMarketSource, question: &str, token: &str, bid: &str, ask: &str) {
        source.add_market(MockMarketBuilder::new(question).tokens(&[token, "no"]).build());
        source.set_order_book(token, MockOrderBookBuilder::new().with_quote(bid, ask).build());
    }

    /// Placeholder, active, extreme and narrow books plus every per-market failure.
    fn mixed_source() -> MockMarketSource {
        let source = MockMarketSource::new();
        add(&source, "Dust one?", "1", "0.005", "0.995");
        add(&source, "Live one?", "2", "0.40", "0.42");
        add(&source, "Nearly settled?", "3", "0.02", "0.50");
        add(&source, "Tight?", "4", "0.5", "0.5005");

        source.add_market(MockMarketBuilder::new("Closed?").tokens(&["5"]).closed().build());
        source.add_market(MockMarketBuilder::new("Garbled?").raw_tokens("not json").build());
        source.add_market(MockMarketBuilder::new("Empty?").tokens(&[]).build());
        source.add_market(MockMarketBuilder::new("Missing book?").tokens(&["6"]).build());
        source.add_market(MockMarketBuilder::new("One sided?").tokens(&["7"]).build());
        source.set_order_book("7", MockOrderBookBuilder::new().bid("0.40", "10").build());
        source.add_market(MockMarketBuilder::new("Bad price?").tokens(&["8"]).build());
        source.set_order_book("8", MockOrderBookBuilder::new().with_quote("0.40", "x").build());

        add(&source, "Dust two?", "9", "0.001", "0.999");
        source
    }

    #[tokio::test]
    async fn illiquid_scan_keeps_placeholder_books_in_order() {
        let scanner = OpportunityScanner::new(mixed_source(), config());
        let opportunities = scanner.scan_illiquid().await.unwrap();

        let questions: Vec<_> = opportunities.iter().map(|o| o.question.as_str()).collect();
        assert_eq!(questions, vec!["Dust one?", "Dust two?"]);

        for opp in &opportunities {
            assert!(opp.is_illiquid);
            assert!(opp.best_bid <= PLACEHOLDER_MAX_BID && opp.best_ask >= PLACEHOLDER_MIN_ASK);
            assert_eq!(opp.suggested_buy_price, dec!(0.40));
            assert_eq!(opp.suggested_sell_price, dec!(0.60));
        }
    }

    #[tokio::test]
    async fn active_scan_keeps_only_quotable_books() {
        let scanner = OpportunityScanner::new(mixed_source(), config());
        let opportunities = scanner.scan_active().await.unwrap();

        assert_eq!(opportunities.len(), 1);
        let opp = &opportunities[0];
        assert_eq!(opp.question, "Live one?");
        assert_eq!(opp.token_id, "2");
        assert_eq!(opp.spread_pct, dec!(0.05));
        assert_eq!(opp.suggested_buy_price, dec!(0.4095));
        assert_eq!(opp.suggested_sell_price, dec!(0.4105));
        assert!(!opp.is_illiquid);
    }

    #[tokio::test]
    async fn report_counts_every_skip() {
        let scanner = OpportunityScanner::new(mixed_source(), config());
        let report = scanner.scan(ScanMode::Active).await.unwrap();

        assert_eq!(report.mode, ScanMode::Active);
        assert_eq!(
            report.stats,
            ScanStats {
                listed: 11,
                closed: 1,
                bad_token_ids: 2,
                fetch_failed: 1,
                unusable_book: 2,
                filtered: 4,
                opportunities: 1,
            }
        );
        assert_eq!(report.stats.skipped() + report.stats.opportunities, report.stats.listed);
    }

    #[tokio::test]
    async fn only_first_token_is_fetched_and_closed_markets_are_not() {
        let source = mixed_source();
        let scanner = OpportunityScanner::new(source.clone(), config());
        scanner.scan_illiquid().await.unwrap();

        assert_eq!(
            source.requested_tokens(),
            vec!["1", "2", "3", "4", "6", "7", "8", "9"]
        );
    }

    #[tokio::test]
    async fn failing_book_does_not_abort_scan() {
        let source = mixed_source();
        source.fail_token("1");
        let scanner = OpportunityScanner::new(source, config());

        let report = scanner.scan(ScanMode::Illiquid).await.unwrap();
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.stats.fetch_failed, 2);
    }

    #[tokio::test]
    async fn listing_failure_aborts_scan() {
        let source = MockMarketSource::with_config(MockConfig {
            fail_listing: true,
            ..Default::default()
        });
        let scanner = OpportunityScanner::new(source, config());

        let err = scanner.scan_active().await.unwrap_err();
        assert!(matches!(err, ScanError::Listing(MarketError::FetchFailed { .. })));
    }

    #[tokio::test]
    async fn empty_listing_is_an_empty_result() {
        let scanner = OpportunityScanner::new(MockMarketSource::new(), config());
        let report = scanner.scan(ScanMode::Illiquid).await.unwrap();

        assert!(report.opportunities.is_empty());
        assert_eq!(report.stats, ScanStats::default());
    }

    #[tokio::test]
    async fn listing_is_capped_at_max_markets() {
        let scanner = OpportunityScanner::new(
            mixed_source(),
            ScanConfig {
                max_markets: 1,
                ..config()
            },
        );
        let report = scanner.scan(ScanMode::Illiquid).await.unwrap();

        assert_eq!(report.stats.listed, 1);
        assert_eq!(report.opportunities.len(), 1);
    }

    #[tokio::test]
    async fn throttle_applies_after_every_fetch() {
        let source = MockMarketSource::new();
        add(&source, "A?", "a", "0.001", "0.999");
        source.add_market(MockMarketBuilder::new("B?").tokens(&["b"]).build());

        let scanner = OpportunityScanner::new(
            source,
            ScanConfig {
                throttle: Duration::from_millis(20),
                ..ScanConfig::default()
            },
        );

        let start = Instant::now();
        scanner.scan_illiquid().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn active_output_respects_filters_on_generated_books() {
        let source = MockMarketSource::new();
        let prices = ["0.001", "0.01", "0.04", "0.05", "0.30", "0.50", "0.501", "0.70", "0.95", "0.96", "0.999"];
        let mut n = 0;
        for bid in prices {
            for ask in prices {
                if bid < ask {
                    let token = n.to_string();
                    add(&source, "Generated?", &token, bid, ask);
                    n += 1;
                }
            }
        }

        let cfg = config();
        let scanner = OpportunityScanner::new(source, cfg.clone());
        let opportunities = scanner.scan_active().await.unwrap();
        assert!(!opportunities.is_empty());

        for opp in opportunities {
            assert!(opp.best_bid >= dec!(0.05));
            assert!(opp.best_ask <= dec!(0.95));
            assert!(opp.spread_pct >= cfg.min_spread_pct);
            let half = cfg.target_spread_pct / Decimal::TWO;
            assert_eq!(opp.suggested_buy_price, opp.mid() - half);
            assert_eq!(opp.suggested_sell_price, opp.mid() + half);
        }
    }

    #[tokio::test]
    async fn book_with_out_of_range_spread_is_skipped() {
        let source = MockMarketSource::new();
        add(&source, "Dust one?", "1", "0.005", "0.995");
        add(&source, "Overflowing?", "2", "0.0000000000000000000000000001", "8");
        add(&source, "Dust two?", "3", "0.001", "0.999");

        let scanner = OpportunityScanner::new(source, config());
        let report = scanner.scan(ScanMode::Illiquid).await.unwrap();

        let tokens: Vec<_> = report.opportunities.iter().map(|o| o.token_id.as_str()).collect();
        assert_eq!(tokens, vec!["1", "3"]);
        assert_eq!(report.stats.unusable_book, 1);
    }
}
