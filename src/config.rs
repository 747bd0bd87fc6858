//! Application configuration loaded from environment variables.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::scanner::ScanConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Scan Parameters ===
    /// Minimum relative spread a book needs to be worth quoting (0.002 = 0.2%).
    #[serde(default = "default_min_spread_pct")]
    pub min_spread_pct: Decimal,

    /// Width of our own quotes around the mid (0.001 = 0.1%).
    #[serde(default = "default_target_spread_pct")]
    pub target_spread_pct: Decimal,

    /// Number of markets requested from the listing endpoint.
    #[serde(default = "default_max_markets")]
    pub max_markets: usize,

    // === Endpoints ===
    /// Gamma API base URL (market listing).
    #[serde(default = "default_gamma_url")]
    pub gamma_api_url: String,

    /// CLOB API base URL (order books).
    #[serde(default = "default_clob_url")]
    pub clob_api_url: String,

    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Pause after every order-book request, in milliseconds.
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,

    // === Reporting ===
    /// Bankroll used for dust-market position sizing, in dollars.
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,

    /// Maximum opportunities printed by the illiquid and active reports.
    #[serde(default = "default_report_limit")]
    pub report_limit: usize,

    /// Maximum opportunities printed per category by the dust report.
    #[serde(default = "default_dust_category_limit")]
    pub dust_category_limit: usize,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_min_spread_pct() -> Decimal {
    Decimal::new(2, 3) // 0.002
}

fn default_target_spread_pct() -> Decimal {
    Decimal::new(1, 3) // 0.001
}

fn default_max_markets() -> usize {
    100
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_clob_url() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_throttle_ms() -> u64 {
    50
}

fn default_bankroll() -> Decimal {
    Decimal::new(500, 0) // $500
}

fn default_report_limit() -> usize {
    10
}

fn default_dust_category_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_spread_pct: default_min_spread_pct(),
            target_spread_pct: default_target_spread_pct(),
            max_markets: default_max_markets(),
            gamma_api_url: default_gamma_url(),
            clob_api_url: default_clob_url(),
            http_timeout_ms: default_http_timeout_ms(),
            throttle_ms: default_throttle_ms(),
            bankroll: default_bankroll(),
            report_limit: default_report_limit(),
            dust_category_limit: default_dust_category_limit(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_spread_pct <= Decimal::ZERO || self.min_spread_pct >= Decimal::ONE {
            return Err("MIN_SPREAD_PCT must be between 0 and 1".to_string());
        }

        if self.target_spread_pct <= Decimal::ZERO || self.target_spread_pct >= Decimal::ONE {
            return Err("TARGET_SPREAD_PCT must be between 0 and 1".to_string());
        }

        if self.max_markets == 0 {
            return Err("MAX_MARKETS must be at least 1".to_string());
        }

        if self.bankroll <= Decimal::ZERO {
            return Err("BANKROLL must be positive".to_string());
        }

        validate_base_url("GAMMA_API_URL", &self.gamma_api_url)?;
        validate_base_url("CLOB_API_URL", &self.clob_api_url)?;

        Ok(())
    }

    /// Scan parameters consumed by the opportunity scanner.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_spread_pct: self.min_spread_pct,
            target_spread_pct: self.target_spread_pct,
            max_markets: self.max_markets,
            throttle: Duration::from_millis(self.throttle_ms),
        }
    }

    /// HTTP request timeout.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("{name} must use http or https, got {other}")),
    }
}
