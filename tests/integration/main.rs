//! Integration tests for the Polymarket scanner.
//!
//! Offline tests run the full scan/report pipeline against the in-memory
//! market source. Live tests hit the real Polymarket API and are ignored by
//! default.
//! Run with: cargo test --test integration -- --ignored

use std::time::Duration;

use polymarket_mm::config::Config;
use polymarket_mm::error::{MarketError, ScanError};
use polymarket_mm::market::{
    MarketSource, MockConfig, MockMarketBuilder, MockMarketSource, MockOrderBookBuilder,
    PolymarketClient,
};
use polymarket_mm::pricing::Category;
use polymarket_mm::report::{analyze_dust, group_by_category, ActiveSummary};
use polymarket_mm::scanner::{OpportunityScanner, ScanConfig, ScanMode};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_test::{assert_err, assert_ok};

fn offline_config() -> ScanConfig {
    ScanConfig {
        throttle: Duration::ZERO,
        ..ScanConfig::default()
    }
}

fn listed(source: &MockMarketSource, question: &str, token: &str, bid: &str, ask: &str) {
    source.add_market(
        MockMarketBuilder::new(question)
            .tokens(&[token, "other"])
            .volume(dec!(1000))
            .build(),
    );
    source.set_order_book(token, MockOrderBookBuilder::new().with_quote(bid, ask).build());
}

fn venue() -> MockMarketSource {
    let source = MockMarketSource::new();
    listed(&source, "Will the Chiefs win the Super Bowl?", "chiefs", "0.005", "0.995");
    listed(&source, "Will Fed increase rates in 2025?", "fed", "0.001", "0.999");
    listed(&source, "Who will be the next mayor of Chicago?", "mayor", "0.01", "0.99");
    listed(&source, "Will it snow in Paris?", "snow", "0.40", "0.42");
    listed(&source, "Will the Browns win Super Bowl LX?", "browns", "0.003", "0.997");
    source
}

#[tokio::test]
async fn dust_pipeline_prices_each_category() {
    let scanner = OpportunityScanner::new(venue(), offline_config());
    let opportunities = assert_ok!(scanner.scan_illiquid().await);
    assert_eq!(opportunities.len(), 4);

    let entries = analyze_dust(opportunities, dec!(500));
    let groups = group_by_category(&entries, 5);

    let layout: Vec<_> = groups.iter().map(|g| (g.category, g.total)).collect();
    assert_eq!(
        layout,
        vec![
            (Category::Sports, 2),
            (Category::Politics, 1),
            (Category::Economic, 1),
        ]
    );

    let sports = &groups[0].entries;
    assert_eq!((sports[0].pricing.bid, sports[0].pricing.ask), (dec!(0.08), dec!(0.12)));
    assert_eq!((sports[1].pricing.bid, sports[1].pricing.ask), (dec!(0.005), dec!(0.015)));

    let economic = &groups[2].entries[0];
    assert_eq!((economic.pricing.bid, economic.pricing.ask), (dec!(0.20), dec!(0.40)));

    for entry in &entries {
        assert_eq!(entry.sizing.buy_size, entry.sizing.sell_size);
        assert!(entry.position_size() >= dec!(5) && entry.position_size() <= dec!(50));
        assert!(entry.rationale().contains(" | "));
    }
}

#[tokio::test]
async fn active_pipeline_and_summary() {
    let scanner = OpportunityScanner::new(venue(), offline_config());
    let report = assert_ok!(scanner.scan(ScanMode::Active).await);

    assert_eq!(report.opportunities.len(), 1);
    let opp = &report.opportunities[0];
    assert_eq!(opp.token_id, "snow");
    assert_eq!(opp.suggested_buy_price, dec!(0.4095));
    assert_eq!(opp.suggested_sell_price, dec!(0.4105));

    let summary = ActiveSummary::from_opportunities(&report.opportunities);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.total_volume, dec!(1000));
    assert_eq!(summary.average_spread_pct, dec!(0.05));
    assert_eq!(report.stats.filtered, 4);
}

#[tokio::test]
async fn scans_are_independent_and_repeatable() {
    let scanner = OpportunityScanner::new(venue(), offline_config());

    let first = assert_ok!(scanner.scan_illiquid().await);
    let second = assert_ok!(scanner.scan_illiquid().await);
    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_failure_is_a_hard_error() {
    let source = MockMarketSource::with_config(MockConfig {
        fail_listing: true,
        latency_ms: 1,
    });
    let scanner = OpportunityScanner::new(source, offline_config());

    let err = assert_err!(scanner.scan_illiquid().await);
    assert!(matches!(err, ScanError::Listing(MarketError::FetchFailed { .. })));
    assert!(err.to_string().starts_with("market listing failed"));
}

#[tokio::test]
async fn broken_markets_are_skipped_not_fatal() {
    let source = venue();
    source.fail_token("chiefs");
    source.add_market(MockMarketBuilder::new("Garbled?").raw_tokens("[1,").build());

    let scanner = OpportunityScanner::new(source, offline_config());
    let report = assert_ok!(scanner.scan(ScanMode::Illiquid).await);

    assert_eq!(report.opportunities.len(), 3);
    assert_eq!(report.stats.fetch_failed, 1);
    assert_eq!(report.stats.bad_token_ids, 1);
}

// === Live API ===

fn live_config() -> Config {
    dotenvy::dotenv().ok();
    Config::load().unwrap_or_default()
}

/// Test that the Gamma listing decodes.
#[tokio::test]
#[ignore = "requires network access to the Polymarket API"]
async fn test_live_listing() {
    let config = live_config();
    let client = assert_ok!(PolymarketClient::new(&config));

    let markets = assert_ok!(client.list_markets(5).await);
    assert!(markets.len() <= 5);
    for market in &markets {
        assert!(!market.closed, "listing should only return open markets");
    }
    println!("Fetched {} markets", markets.len());
}

/// Test that an order book for a listed market decodes.
#[tokio::test]
#[ignore = "requires network access to the Polymarket API"]
async fn test_live_order_book() {
    let config = live_config();
    let client = assert_ok!(PolymarketClient::new(&config));

    let markets = assert_ok!(client.list_markets(10).await);
    let Some(token_id) = markets.iter().find_map(|m| m.yes_token_id()) else {
        println!("Skipping: no market with token ids");
        return;
    };

    let book = assert_ok!(client.get_order_book(&token_id).await);
    if let Ok(quote) = book.best_quote() {
        assert!(quote.best_bid >= Decimal::ZERO);
        println!("Best bid {} / best ask {}", quote.best_bid, quote.best_ask);
    }
}

/// Test a full active scan end to end.
#[tokio::test]
#[ignore = "requires network access to the Polymarket API"]
async fn test_live_active_scan() {
    let config = Config {
        max_markets: 10,
        ..live_config()
    };
    let client = assert_ok!(PolymarketClient::new(&config));
    let scanner = OpportunityScanner::new(client, config.scan_config());

    let report = assert_ok!(scanner.scan(ScanMode::Active).await);
    assert_eq!(
        report.stats.skipped() + report.stats.opportunities,
        report.stats.listed
    );
    for opp in &report.opportunities {
        assert!(opp.best_bid >= dec!(0.05) && opp.best_ask <= dec!(0.95));
    }
}
