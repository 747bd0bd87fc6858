//! Opportunity records emitted by a scan.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};

use crate::market::Market;
use crate::orderbook::{mid_price, Quote};

/// Which filter a scan applies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ScanMode {
    /// Placeholder books with no genuine quotes.
    Illiquid,
    /// Genuinely quoted books with room inside the spread.
    Active,
}

impl ScanMode {
    /// Static label for metrics and logs.
    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Fixed bid for markets nobody quotes.
pub const ILLIQUID_BUY_PRICE: Decimal = dec!(0.40);
/// Fixed offer for markets nobody quotes.
pub const ILLIQUID_SELL_PRICE: Decimal = dec!(0.60);

/// A market worth quoting, with the book it was found on and our suggested prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    /// Market question.
    pub question: String,
    /// Token whose book was read (the first outcome).
    pub token_id: String,
    /// 24h volume from the listing.
    pub volume: Decimal,
    /// Best bid on the book.
    pub best_bid: Decimal,
    /// Best ask on the book.
    pub best_ask: Decimal,
    /// (best_ask - best_bid) / best_bid, zero when the bid is not positive.
    pub spread_pct: Decimal,
    /// Price we would bid at.
    pub suggested_buy_price: Decimal,
    /// Price we would offer at.
    pub suggested_sell_price: Decimal,
    /// Whether this came from the illiquid scan.
    pub is_illiquid: bool,
}

impl Opportunity {
    fn from_book(
        market: &Market,
        token_id: String,
        quote: Quote,
        buy: Decimal,
        sell: Decimal,
        is_illiquid: bool,
    ) -> Self {
        Self {
            question: market.question.clone(),
            token_id,
            volume: market.volume_24hr,
            best_bid: quote.best_bid,
            best_ask: quote.best_ask,
            spread_pct: quote.spread_pct(),
            suggested_buy_price: buy,
            suggested_sell_price: sell,
            is_illiquid,
        }
    }

    /// Quote a placeholder book at the fixed 0.40 / 0.60.
    pub fn illiquid(market: &Market, token_id: String, quote: Quote) -> Self {
        Self::from_book(
            market,
            token_id,
            quote,
            ILLIQUID_BUY_PRICE,
            ILLIQUID_SELL_PRICE,
            true,
        )
    }

    /// Quote a live book `target_spread_pct` wide around its midpoint.
    pub fn active(market: &Market, token_id: String, quote: Quote, target_spread_pct: Decimal) -> Self {
        let mid = quote.mid();
        let half = target_spread_pct / Decimal::TWO;
        Self::from_book(market, token_id, quote, mid - half, mid + half, false)
    }

    /// Top of book this opportunity was found on.
    pub fn quote(&self) -> Quote {
        Quote::new(self.best_bid, self.best_ask)
    }

    /// Midpoint of the book.
    pub fn mid(&self) -> Decimal {
        mid_price(self.best_bid, self.best_ask)
    }

    /// Width of our suggested quotes relative to the book midpoint.
    pub fn quoted_spread_pct(&self) -> Decimal {
        let mid = self.mid();
        if mid.is_zero() {
            return Decimal::ZERO;
        }
        (self.suggested_sell_price - self.suggested_buy_price) / mid
    }

    /// Profit of buying at our bid and selling at our offer, relative to the buy.
    pub fn round_trip_profit_pct(&self) -> Decimal {
        if self.suggested_buy_price <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.suggested_sell_price - self.suggested_buy_price) / self.suggested_buy_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketBuilder;
    use std::str::FromStr;

    fn market() -> Market {
        MockMarketBuilder::new("Will it rain?")
            .tokens(&["111"])
            .volume(dec!(2500))
            .build()
    }

    #[test]
    fn illiquid_uses_fixed_prices() {
        let opp = Opportunity::illiquid(
            &market(),
            "111".to_string(),
            Quote::new(dec!(0.005), dec!(0.995)),
        );

        assert!(opp.is_illiquid);
        assert_eq!(opp.suggested_buy_price, dec!(0.40));
        assert_eq!(opp.suggested_sell_price, dec!(0.60));
        assert_eq!(opp.volume, dec!(2500));
        assert_eq!(opp.question, "Will it rain?");
    }

    #[test]
    fn active_centers_on_mid() {
        let opp = Opportunity::active(
            &market(),
            "111".to_string(),
            Quote::new(dec!(0.40), dec!(0.42)),
            dec!(0.001),
        );

        assert!(!opp.is_illiquid);
        assert_eq!(opp.spread_pct, dec!(0.05));
        assert_eq!(opp.suggested_buy_price, dec!(0.4095));
        assert_eq!(opp.suggested_sell_price, dec!(0.4105));
        assert_eq!(opp.mid(), dec!(0.41));
        assert_eq!(opp.quote(), Quote::new(dec!(0.40), dec!(0.42)));
    }

    #[test]
    fn derived_percentages() {
        let opp = Opportunity::active(
            &market(),
            "111".to_string(),
            Quote::new(dec!(0.49), dec!(0.51)),
            dec!(0.01),
        );

        assert_eq!(opp.quoted_spread_pct(), dec!(0.02));
        assert_eq!(opp.round_trip_profit_pct(), dec!(0.01) / dec!(0.495));

        let illiquid = Opportunity::illiquid(
            &market(),
            "111".to_string(),
            Quote::new(Decimal::ZERO, Decimal::ONE),
        );
        assert_eq!(illiquid.spread_pct, Decimal::ZERO);
        assert_eq!(illiquid.round_trip_profit_pct(), dec!(0.5));
    }

    #[test]
    fn scan_mode_labels() {
        assert_eq!(ScanMode::Illiquid.to_string(), "illiquid");
        assert_eq!(ScanMode::Active.label(), "active");
        assert_eq!(ScanMode::from_str("Active").unwrap(), ScanMode::Active);
    }
}
