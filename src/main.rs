//! Polymarket market-making scanner entry point.

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use polymarket_mm::config::Config;
use polymarket_mm::market::PolymarketClient;
use polymarket_mm::metrics;
use polymarket_mm::report::{analyze_dust, group_by_category, ActiveSummary};
use polymarket_mm::scanner::{OpportunityScanner, ScanMode, ScanReport};

const BANNER: &str = "======================================================================";
const RULE: &str = "----------------------------------------------------------------------";

/// Polymarket market-making opportunity scanner.
#[derive(Parser, Debug)]
#[command(name = "polymarket-mm")]
#[command(about = "Find Polymarket markets worth quoting and suggest prices and sizes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print Prometheus metrics after the report.
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Command-line overrides for environment configuration.
#[derive(clap::Args, Debug)]
struct Overrides {
    /// Number of markets to request from the listing.
    #[arg(long, global = true)]
    max_markets: Option<usize>,

    /// Minimum book spread for the active scan (0.002 = 0.2%).
    #[arg(long, global = true)]
    min_spread: Option<Decimal>,

    /// Width of suggested quotes in the active scan (0.001 = 0.1%).
    #[arg(long, global = true)]
    target_spread: Option<Decimal>,

    /// Bankroll for dust position sizing, in dollars.
    #[arg(long, global = true)]
    bankroll: Option<Decimal>,

    /// Maximum entries printed (per category for the dust report).
    #[arg(long, global = true)]
    limit: Option<usize>,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(v) = self.max_markets {
            config.max_markets = v;
        }
        if let Some(v) = self.min_spread {
            config.min_spread_pct = v;
        }
        if let Some(v) = self.target_spread {
            config.target_spread_pct = v;
        }
        if let Some(v) = self.bankroll {
            config.bankroll = v;
        }
        if let Some(v) = self.limit {
            config.report_limit = v;
            config.dust_category_limit = v;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find markets showing the placeholder book (default).
    Illiquid,

    /// Find genuinely quoted markets with room inside the spread.
    Active,

    /// Categorize, price and size placeholder markets.
    Dust,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let loaded = Config::load();

    // Initialize logging
    let verbose = args.verbose || loaded.as_ref().is_ok_and(|c| c.verbose);
    let filter = if verbose {
        EnvFilter::new("polymarket_mm=debug,info")
    } else {
        let fallback = loaded
            .as_ref()
            .map(|c| c.rust_log.clone())
            .unwrap_or_else(|_| "info".to_string());
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    let prometheus = if args.print_metrics {
        Some(install_prometheus()?)
    } else {
        None
    };
    metrics::init_metrics();

    match args.command.unwrap_or(Command::Illiquid) {
        Command::CheckConfig => cmd_check_config(loaded, &args.overrides)?,
        Command::Illiquid => {
            let (config, scanner) = build_scanner(loaded, &args.overrides)?;
            cmd_illiquid(&scanner, &config).await?
        }
        Command::Active => {
            let (config, scanner) = build_scanner(loaded, &args.overrides)?;
            cmd_active(&scanner, &config).await?
        }
        Command::Dust => {
            let (config, scanner) = build_scanner(loaded, &args.overrides)?;
            cmd_dust(&scanner, &config).await?
        }
    }

    if let Some(handle) = prometheus {
        println!("{}", RULE);
        println!("Metrics:");
        print!("{}", handle.render());
    }

    Ok(())
}

/// Apply overrides, validate, and wire the scanner to the live API.
fn build_scanner(
    loaded: Result<Config, envy::Error>,
    overrides: &Overrides,
) -> anyhow::Result<(Config, OpportunityScanner<PolymarketClient>)> {
    let mut config = loaded.map_err(|e| anyhow::anyhow!("Configuration load failed: {}", e))?;
    overrides.apply(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    let client = PolymarketClient::new(&config)?;
    let scanner = OpportunityScanner::new(client, config.scan_config());
    Ok((config, scanner))
}

fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))
}

/// Check configuration validity.
fn cmd_check_config(
    loaded: Result<Config, envy::Error>,
    overrides: &Overrides,
) -> anyhow::Result<()> {
    println!("{}", BANNER);
    println!("POLYMARKET MM SCANNER - CONFIGURATION CHECK");
    println!("{}", BANNER);

    // Load configuration
    print!("Loading configuration... ");
    let mut config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };
    overrides.apply(&mut config);

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("{}", RULE);
    println!("Configuration Summary:");
    println!("  Min Spread: {:.3}%", config.min_spread_pct * Decimal::ONE_HUNDRED);
    println!("  Target Spread: {:.3}%", config.target_spread_pct * Decimal::ONE_HUNDRED);
    println!("  Max Markets: {}", config.max_markets);
    println!("  Gamma API: {}", config.gamma_api_url);
    println!("  CLOB API: {}", config.clob_api_url);
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Throttle: {}ms", config.throttle_ms);
    println!("  Bankroll: ${}", config.bankroll);
    println!("  Report Limit: {}", config.report_limit);
    println!("  Dust Category Limit: {}", config.dust_category_limit);
    println!("{}", BANNER);
    println!("CONFIGURATION CHECK PASSED");
    println!("{}", BANNER);

    Ok(())
}

/// Scan for placeholder books and list them.
async fn cmd_illiquid(
    scanner: &OpportunityScanner<PolymarketClient>,
    config: &Config,
) -> anyhow::Result<()> {
    println!("{}", BANNER);
    println!("POLYMARKET MM SCANNER - ILLIQUID MARKETS");
    println!("{}", BANNER);
    println!("\nScanning for illiquid markets with placeholder orderbooks...");

    let report = scanner.scan(ScanMode::Illiquid).await?;
    let opportunities = &report.opportunities;

    if opportunities.is_empty() {
        println!("\nNo illiquid markets found with placeholder orderbooks.");
        print_scan_footer(&report);
        return Ok(());
    }

    println!("\n[SUCCESS] Found {} illiquid markets!\n", opportunities.len());
    println!("Top opportunities:\n");

    for (i, opp) in opportunities.iter().take(config.report_limit).enumerate() {
        println!("{}. {}", i + 1, opp.question);
        println!(
            "   Current: Bid {:.4} | Ask {:.4} | Spread {:.2}%",
            opp.best_bid,
            opp.best_ask,
            opp.spread_pct * Decimal::ONE_HUNDRED
        );
        println!(
            "   Suggested: Buy {:.4} | Sell {:.4}",
            opp.suggested_buy_price, opp.suggested_sell_price
        );
        println!("   Token ID: {}", opp.token_id);
        println!();
    }

    print_scan_footer(&report);
    Ok(())
}

/// Scan for genuinely quoted books and list them with a summary.
async fn cmd_active(
    scanner: &OpportunityScanner<PolymarketClient>,
    config: &Config,
) -> anyhow::Result<()> {
    println!("{}", BANNER);
    println!("POLYMARKET MM SCANNER - ACTIVE MARKETS");
    println!("{}", BANNER);
    println!("\nScanning for active markets with real liquidity...");

    let report = scanner.scan(ScanMode::Active).await?;
    let opportunities = &report.opportunities;

    if opportunities.is_empty() {
        println!("\nNo active markets found with tradeable spreads.");
        println!(
            "All spreads are too tight (< {:.1}%) or markets are illiquid.",
            config.min_spread_pct * Decimal::ONE_HUNDRED
        );
        print_scan_footer(&report);
        return Ok(());
    }

    println!(
        "\n[SUCCESS] Found {} active markets with tradeable spreads!\n",
        opportunities.len()
    );

    for (i, opp) in opportunities.iter().take(config.report_limit).enumerate() {
        println!("{}. {}", i + 1, opp.question);
        println!("   Volume: ${:.0} | Mid: {:.4}", opp.volume, opp.mid());
        println!(
            "   Current Market: Bid {:.4} | Ask {:.4} | Spread {:.3}%",
            opp.best_bid,
            opp.best_ask,
            opp.spread_pct * Decimal::ONE_HUNDRED
        );
        println!(
            "   Your Orders:    Bid {:.4} | Ask {:.4} | Spread {:.3}%",
            opp.suggested_buy_price,
            opp.suggested_sell_price,
            opp.quoted_spread_pct() * Decimal::ONE_HUNDRED
        );
        println!(
            "   Profit per round-trip: ~{:.3}%",
            opp.round_trip_profit_pct() * Decimal::ONE_HUNDRED
        );
        println!("   Token ID: {}", opp.token_id);
        println!();
    }

    let summary = ActiveSummary::from_opportunities(opportunities);
    println!("{}", BANNER);
    println!("Summary:");
    println!("{}", BANNER);
    println!("Markets found: {}", summary.count);
    println!("Total 24h volume: ${:.0}", summary.total_volume);
    println!(
        "Average spread: {:.3}%",
        summary.average_spread_pct * Decimal::ONE_HUNDRED
    );

    print_scan_footer(&report);
    Ok(())
}

/// Scan for placeholder books, then categorize, price and size them.
async fn cmd_dust(
    scanner: &OpportunityScanner<PolymarketClient>,
    config: &Config,
) -> anyhow::Result<()> {
    println!("{}", BANNER);
    println!("POLYMARKET MM SCANNER - DUST MARKET ANALYZER");
    println!("{}", BANNER);
    println!("\nScanning for dust markets with placeholder orderbooks...");

    let report = scanner.scan(ScanMode::Illiquid).await?;

    if report.opportunities.is_empty() {
        println!("\nNo illiquid markets found.");
        print_scan_footer(&report);
        return Ok(());
    }

    println!(
        "\n[SUCCESS] Found {} dust markets!",
        report.opportunities.len()
    );
    println!("\nApplying category pricing (bankroll ${})...", config.bankroll);

    let entries = analyze_dust(report.opportunities.clone(), config.bankroll);
    let groups = group_by_category(&entries, config.dust_category_limit);

    for group in &groups {
        println!("\n{} ({} markets)", group.label, group.total);
        println!("{}", BANNER);

        for (i, entry) in group.entries.iter().enumerate() {
            let opp = &entry.opportunity;
            println!("\n{}. {}", i + 1, opp.question);
            println!("   Category: {}", group.label);
            println!(
                "   Current Market: Bid {:.4} | Ask {:.4} (placeholder)",
                opp.best_bid, opp.best_ask
            );
            println!(
                "   Suggested Prices: Bid {:.4} | Ask {:.4}",
                entry.pricing.bid, entry.pricing.ask
            );
            println!(
                "   Your Spread: {:.3}%",
                entry.our_spread_pct() * Decimal::ONE_HUNDRED
            );
            println!("   Position Size: ${:.0} per side", entry.position_size());
            println!("   Reasoning: {}", entry.rationale());
            println!("   Token ID: {}", opp.token_id);
        }
    }

    print_scan_footer(&report);
    Ok(())
}

fn print_scan_footer(report: &ScanReport) {
    let stats = &report.stats;
    println!("{}", RULE);
    println!(
        "Scanned {} markets: {} opportunities, {} closed, {} bad token ids, {} fetch failures, {} unusable books, {} filtered",
        stats.listed,
        stats.opportunities,
        stats.closed,
        stats.bad_token_ids,
        stats.fetch_failed,
        stats.unusable_book,
        stats.filtered,
    );
    match report.completed_at.format(&Rfc3339) {
        Ok(ts) => println!("Completed at {}", ts),
        Err(e) => warn!(error = %e, "Could not format scan timestamp"),
    }
    println!("{}", BANNER);

    info!(mode = %report.mode, opportunities = stats.opportunities, "Report printed");
}
