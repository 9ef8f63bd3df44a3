//! Pair Detail Normalizer
//!
//! Turns one pair-detail response envelope into a `TokenPairSnapshot`.
//! A missing pair is an expected outcome (`Ok(None)`), not an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{addresses_match, Chain, IdentityResolution, TimeBuckets, TokenPairSnapshot};

use super::types::{PairDetailData, PairSide};

/// What to do when `target_token` matches neither side of the pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousIdentityPolicy {
    /// Treat token1 as the target and mark the snapshot `Defaulted`
    #[default]
    AssumeToken1,
    /// Refuse to build a snapshot
    Reject,
}

impl AmbiguousIdentityPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "assume_token1" => Some(Self::AssumeToken1),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Pair detail errors
#[derive(Debug, Error)]
pub enum PairDetailError {
    #[error("Invalid pair detail JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Target token {target:?} matches neither side of pair {pair}")]
    AmbiguousIdentity { pair: String, target: Option<String> },
}

/// Chain assumed when neither the payload nor the configuration names one
pub const DEFAULT_PAIR_CHAIN: Chain = Chain::Bsc;

/// Normalizes pair-detail envelopes
#[derive(Debug, Clone, Default)]
pub struct PairDetailNormalizer {
    /// Chain assumed when the payload does not name one
    default_chain: Option<Chain>,
    policy: AmbiguousIdentityPolicy,
}

impl PairDetailNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_chain(mut self, chain: Chain) -> Self {
        self.default_chain = Some(chain);
        self
    }

    pub fn with_policy(mut self, policy: AmbiguousIdentityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AmbiguousIdentityPolicy {
        self.policy
    }

    /// Parse and normalize a raw response body
    pub fn normalize_str(&self, body: &str) -> Result<Option<TokenPairSnapshot>, PairDetailError> {
        let envelope: Value = serde_json::from_str(body)?;
        self.normalize(&envelope)
    }

    /// Normalize a decoded response envelope
    ///
    /// `Ok(None)` when `data` or `data.pair` is absent.
    pub fn normalize(&self, envelope: &Value) -> Result<Option<TokenPairSnapshot>, PairDetailError> {
        let Some(data) = PairDetailData::from_envelope(envelope) else {
            tracing::warn!("Pair not found or data is empty");
            return Ok(None);
        };
        self.normalize_data(&data).map(Some)
    }

    /// Build the snapshot from an extracted record
    pub fn normalize_data(&self, data: &PairDetailData) -> Result<TokenPairSnapshot, PairDetailError> {
        let pair = data.pair.clone().unwrap_or_default();
        let chain = self.resolve_chain(data);
        let canonical = |address: Option<String>| match chain {
            Some(c) => address.map(|a| c.family().canonicalize(&a)),
            None => address,
        };

        let identity = resolve_identity(data);
        if identity.is_ambiguous() {
            if self.policy == AmbiguousIdentityPolicy::Reject {
                return Err(PairDetailError::AmbiguousIdentity {
                    pair,
                    target: data.target_token.clone(),
                });
            }
            tracing::warn!(
                pair = %pair,
                target = ?data.target_token,
                "Target token matches neither side, assuming token1"
            );
        }

        let (target, quote): (PairSide, PairSide) = match identity {
            IdentityResolution::Token0 => (data.token0(), data.token1()),
            IdentityResolution::Token1 | IdentityResolution::Defaulted => (data.token1(), data.token0()),
        };

        Ok(TokenPairSnapshot {
            chain,
            pair_address: canonical(Some(pair)).unwrap_or_default(),
            identity,

            token_address: canonical(target.address),
            quote_token_address: canonical(quote.address),
            token_name: target.name.or_else(|| target.symbol.clone()),
            token_symbol: target.symbol,
            quote_token_symbol: quote.symbol,
            amm: data.amm.clone(),

            current_price_usd: target.price_usd,
            price_ath_usd: data.price_ath_u,
            current_tvl: data.tvl,
            current_market_cap: data.market_cap_value(),

            token_created_at: data.first_trade_at,
            first_trade_at: data.first_trade_at,
            creation_block_number: data.creation_block_number,
            creation_tx_hash: data.creation_tx_hash.clone(),

            price_change: TimeBuckets {
                m1: data.price_change_1m,
                m5: data.price_change_5m,
                m15: data.price_change_15m,
                m30: data.price_change_30m,
                h1: data.price_change_1h,
                h4: data.price_change_4h,
                h24: data.price_change_1d,
            },
            volume: TimeBuckets {
                m1: data.volume_u_1m,
                m5: data.volume_u_5m,
                m15: data.volume_u_15m,
                m30: data.volume_u_30m,
                h1: data.volume_u_1h,
                h4: data.volume_u_4h,
                h24: data.volume_u_24h,
            },
            tx_count: TimeBuckets {
                m1: data.tx_1m_count,
                m5: data.tx_5m_count,
                m15: data.tx_15m_count,
                m30: data.tx_30m_count,
                h1: data.tx_1h_count,
                h4: data.tx_4h_count,
                h24: data.tx_24h_count,
            },

            buys_24h: data.buys_tx_24h_count,
            sells_24h: data.sells_tx_24h_count,
            makers_24h: data.makers_24h,
            buyers_24h: data.buyers_24h,
            sellers_24h: data.sellers_24h,

            price_24h_high: data.high_u,
            price_24h_low: data.low_u,
            open_price_24h: data.open_price,

            lp_holders: data.lp_holders,
            lp_locked_percent: data.lp_locked_percent,
            lp_lock_platform: data.lp_lock_platform.clone(),

            rusher_tx_count: data.rusher_tx_count,
            sniper_tx_count: data.sniper_tx_count,
        })
    }

    /// Payload chain first, then the configured default, then BSC
    ///
    /// Only a chain name that is present but unknown yields `None`.
    fn resolve_chain(&self, data: &PairDetailData) -> Option<Chain> {
        match data.chain.as_deref().map(str::parse::<Chain>) {
            Some(Ok(chain)) => Some(chain),
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Unknown chain in pair payload, keeping address case");
                None
            }
            None => Some(self.default_chain.unwrap_or(DEFAULT_PAIR_CHAIN)),
        }
    }
}

/// Which constituent token `target_token` designates
fn resolve_identity(data: &PairDetailData) -> IdentityResolution {
    let Some(target) = data.target_token.as_deref() else {
        return IdentityResolution::Defaulted;
    };
    let matches = |side: &Option<String>| side.as_deref().is_some_and(|a| addresses_match(target, a));

    if matches(&data.token0_address) {
        IdentityResolution::Token0
    } else if matches(&data.token1_address) {
        IdentityResolution::Token1
    } else {
        IdentityResolution::Defaulted
    }
}

/// Normalize with default settings
///
/// Unknown identity falls back to token1, so this never fails.
pub fn parse_pair_detail(envelope: &Value) -> Option<TokenPairSnapshot> {
    match PairDetailNormalizer::default().normalize(envelope) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::debug!(error = %e, "Pair detail rejected");
            None
        }
    }
}
