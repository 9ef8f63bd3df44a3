//! Pair Detail Types
//!
//! Schema of the `data` object returned by the pair-detail API. Each field
//! is coerced once, here, with fails-soft rules: a value of the wrong shape
//! becomes `None` rather than failing the whole record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::numeric::{count_from_json, decimal_from_json, epoch_from_json};

fn lenient_decimal<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
    Ok(decimal_from_json(&Value::deserialize(d)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(count_from_json(&Value::deserialize(d)?))
}

fn lenient_epoch<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(epoch_from_json(&Value::deserialize(d)?))
}

/// Strings and numbers become text; empty text is no value
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let text = match Value::deserialize(d)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Ok(None),
    };
    Ok((!text.is_empty()).then_some(text))
}

/// `data` object of a pair-detail response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PairDetailData {
    #[serde(deserialize_with = "lenient_string")]
    pub pair: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub chain: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub target_token: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub amm: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub token0_address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub token0_symbol: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub token0_name: Option<String>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub token0_price_usd: Option<Decimal>,

    #[serde(deserialize_with = "lenient_string")]
    pub token1_address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub token1_symbol: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub token1_name: Option<String>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub token1_price_usd: Option<Decimal>,

    #[serde(deserialize_with = "lenient_decimal")]
    pub price_ath_u: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub tvl: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub mc: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub market_cap: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub fdv: Option<Decimal>,

    #[serde(deserialize_with = "lenient_epoch")]
    pub first_trade_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_count")]
    pub creation_block_number: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub creation_tx_hash: Option<String>,

    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_1m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_5m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_15m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_30m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_1h: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_4h: Option<Decimal>,
    /// Upstream names the 24h bucket `1d`
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_change_1d: Option<Decimal>,

    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_1m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_5m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_15m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_30m: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_1h: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_4h: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub volume_u_24h: Option<Decimal>,

    #[serde(deserialize_with = "lenient_count")]
    pub tx_1m_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_5m_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_15m_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_30m_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_1h_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_4h_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tx_24h_count: Option<u64>,

    #[serde(deserialize_with = "lenient_count")]
    pub buys_tx_24h_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub sells_tx_24h_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub makers_24h: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub buyers_24h: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub sellers_24h: Option<u64>,

    #[serde(deserialize_with = "lenient_decimal")]
    pub high_u: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub low_u: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub open_price: Option<Decimal>,

    #[serde(deserialize_with = "lenient_count")]
    pub lp_holders: Option<u64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub lp_locked_percent: Option<Decimal>,
    #[serde(deserialize_with = "lenient_string")]
    pub lp_lock_platform: Option<String>,

    #[serde(deserialize_with = "lenient_count")]
    pub rusher_tx_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub sniper_tx_count: Option<u64>,
}

impl PairDetailData {
    /// Extract the record from a response envelope
    ///
    /// `None` when `data` is absent, empty, not an object, or lacks `pair`.
    pub fn from_envelope(envelope: &Value) -> Option<Self> {
        let data = envelope.get("data")?;
        if !data.as_object().is_some_and(|obj| !obj.is_empty()) {
            return None;
        }
        let parsed = PairDetailData::deserialize(data).ok()?;
        parsed.pair.is_some().then_some(parsed)
    }

    /// Market cap, falling back to `market_cap` then `fdv`
    pub fn market_cap_value(&self) -> Option<Decimal> {
        self.mc.or(self.market_cap).or(self.fdv)
    }
}

/// One side of the pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSide {
    pub address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price_usd: Option<Decimal>,
}

impl PairDetailData {
    pub fn token0(&self) -> PairSide {
        PairSide {
            address: self.token0_address.clone(),
            symbol: self.token0_symbol.clone(),
            name: self.token0_name.clone(),
            price_usd: self.token0_price_usd,
        }
    }

    pub fn token1(&self) -> PairSide {
        PairSide {
            address: self.token1_address.clone(),
            symbol: self.token1_symbol.clone(),
            name: self.token1_name.clone(),
            price_usd: self.token1_price_usd,
        }
    }
}
