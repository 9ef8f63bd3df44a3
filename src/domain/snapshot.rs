//! Market Snapshots
//!
//! Immutable, point-in-time records produced by the two normalizers.
//! Every numeric field is optional; `None` means the upstream value was
//! missing or unparsable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chain::Chain;

/// Price change over the four listing buckets (5m, 1h, 6h, 24h)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChangeWindow {
    pub m5: Option<Decimal>,
    pub h1: Option<Decimal>,
    pub h6: Option<Decimal>,
    pub h24: Option<Decimal>,
}

impl PriceChangeWindow {
    /// Window with all four buckets set, in 5m/1h/6h/24h order
    pub fn from_values(values: [Decimal; 4]) -> Self {
        let [m5, h1, h6, h24] = values;
        Self {
            m5: Some(m5),
            h1: Some(h1),
            h6: Some(h6),
            h24: Some(h24),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.m5.is_none() && self.h1.is_none() && self.h6.is_none() && self.h24.is_none()
    }
}

/// Values over the pair-detail buckets (1m, 5m, 15m, 30m, 1h, 4h, 24h)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBuckets<T> {
    pub m1: Option<T>,
    pub m5: Option<T>,
    pub m15: Option<T>,
    pub m30: Option<T>,
    pub h1: Option<T>,
    pub h4: Option<T>,
    pub h24: Option<T>,
}

impl<T> Default for TimeBuckets<T> {
    fn default() -> Self {
        Self {
            m1: None,
            m5: None,
            m15: None,
            m30: None,
            h1: None,
            h4: None,
            h24: None,
        }
    }
}

impl<T> TimeBuckets<T> {
    /// Bucket values paired with their labels, shortest first
    pub fn entries(&self) -> [(&'static str, Option<&T>); 7] {
        [
            ("1m", self.m1.as_ref()),
            ("5m", self.m5.as_ref()),
            ("15m", self.m15.as_ref()),
            ("30m", self.m30.as_ref()),
            ("1h", self.h1.as_ref()),
            ("4h", self.h4.as_ref()),
            ("24h", self.h24.as_ref()),
        ]
    }
}

/// Normalized listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenListingSnapshot {
    /// Canonical pair address
    pub pair_address: String,
    pub chain: Chain,
    /// 1-based position in the scraped listing
    pub rank: u32,
    pub url: String,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    /// Quote side of the pair as shown in the row (e.g. WBNB)
    pub base_token: Option<String>,
    /// DEX pool type marker (Solana layouts only)
    pub dex_type: Option<String>,
    pub price_usd: Option<Decimal>,
    pub price_change: PriceChangeWindow,
    pub market_cap: Option<Decimal>,
    pub liquidity_usd: Option<Decimal>,
    pub fdv: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
}

impl TokenListingSnapshot {
    /// Names of the data fields left unset
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("token_name", self.token_name.is_none()),
            ("token_symbol", self.token_symbol.is_none()),
            ("base_token", self.base_token.is_none()),
            ("price_usd", self.price_usd.is_none()),
            ("price_change_5m", self.price_change.m5.is_none()),
            ("price_change_1h", self.price_change.h1.is_none()),
            ("price_change_6h", self.price_change.h6.is_none()),
            ("price_change_24h", self.price_change.h24.is_none()),
            ("market_cap", self.market_cap.is_none()),
            ("liquidity_usd", self.liquidity_usd.is_none()),
            ("fdv", self.fdv.is_none()),
            ("volume_24h", self.volume_24h.is_none()),
        ];
        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }
}

/// How the target token of a pair was identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityResolution {
    /// `target_token` matched token0
    Token0,
    /// `target_token` matched token1
    Token1,
    /// `target_token` matched neither side; token1 was assumed
    Defaulted,
}

impl IdentityResolution {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, IdentityResolution::Defaulted)
    }
}

/// Normalized pair-detail response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPairSnapshot {
    pub chain: Option<Chain>,
    pub pair_address: String,
    pub identity: IdentityResolution,

    pub token_address: Option<String>,
    pub quote_token_address: Option<String>,
    pub token_symbol: Option<String>,
    pub token_name: Option<String>,
    pub quote_token_symbol: Option<String>,
    pub amm: Option<String>,

    pub current_price_usd: Option<Decimal>,
    pub price_ath_usd: Option<Decimal>,
    pub current_tvl: Option<Decimal>,
    pub current_market_cap: Option<Decimal>,

    pub token_created_at: Option<DateTime<Utc>>,
    pub first_trade_at: Option<DateTime<Utc>>,
    pub creation_block_number: Option<u64>,
    pub creation_tx_hash: Option<String>,

    pub price_change: TimeBuckets<Decimal>,
    pub volume: TimeBuckets<Decimal>,
    pub tx_count: TimeBuckets<u64>,

    pub buys_24h: Option<u64>,
    pub sells_24h: Option<u64>,
    pub makers_24h: Option<u64>,
    pub buyers_24h: Option<u64>,
    pub sellers_24h: Option<u64>,

    pub price_24h_high: Option<Decimal>,
    pub price_24h_low: Option<Decimal>,
    pub open_price_24h: Option<Decimal>,

    pub lp_holders: Option<u64>,
    pub lp_locked_percent: Option<Decimal>,
    pub lp_lock_platform: Option<String>,

    pub rusher_tx_count: Option<u64>,
    pub sniper_tx_count: Option<u64>,
}

impl TokenPairSnapshot {
    /// Names of the data fields left unset
    pub fn missing_fields(&self) -> Vec<String> {
        let scalars = [
            ("token_address", self.token_address.is_none()),
            ("quote_token_address", self.quote_token_address.is_none()),
            ("token_symbol", self.token_symbol.is_none()),
            ("token_name", self.token_name.is_none()),
            ("quote_token_symbol", self.quote_token_symbol.is_none()),
            ("amm", self.amm.is_none()),
            ("current_price_usd", self.current_price_usd.is_none()),
            ("price_ath_usd", self.price_ath_usd.is_none()),
            ("current_tvl", self.current_tvl.is_none()),
            ("current_market_cap", self.current_market_cap.is_none()),
            ("token_created_at", self.token_created_at.is_none()),
            ("first_trade_at", self.first_trade_at.is_none()),
            ("creation_block_number", self.creation_block_number.is_none()),
            ("creation_tx_hash", self.creation_tx_hash.is_none()),
            ("buys_24h", self.buys_24h.is_none()),
            ("sells_24h", self.sells_24h.is_none()),
            ("makers_24h", self.makers_24h.is_none()),
            ("buyers_24h", self.buyers_24h.is_none()),
            ("sellers_24h", self.sellers_24h.is_none()),
            ("price_24h_high", self.price_24h_high.is_none()),
            ("price_24h_low", self.price_24h_low.is_none()),
            ("open_price_24h", self.open_price_24h.is_none()),
            ("lp_holders", self.lp_holders.is_none()),
            ("lp_locked_percent", self.lp_locked_percent.is_none()),
            ("lp_lock_platform", self.lp_lock_platform.is_none()),
            ("rusher_tx_count", self.rusher_tx_count.is_none()),
            ("sniper_tx_count", self.sniper_tx_count.is_none()),
        ];

        let mut missing: Vec<String> = scalars
            .into_iter()
            .filter_map(|(name, missing)| missing.then(|| name.to_string()))
            .collect();

        missing.extend(missing_buckets("price_change", &self.price_change));
        missing.extend(missing_buckets("volume", &self.volume));
        missing.extend(missing_buckets("tx_count", &self.tx_count));
        missing
    }
}

fn missing_buckets<T>(prefix: &str, buckets: &TimeBuckets<T>) -> Vec<String> {
    buckets
        .entries()
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(label, _)| format!("{}_{}", prefix, label))
        .collect()
}
