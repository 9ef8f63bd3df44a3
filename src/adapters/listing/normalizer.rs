//! Listing Row Normalizer
//!
//! Turns one scraped listing row (its link plus flattened text) into a
//! `TokenListingSnapshot`. The link decides whether the row belongs to the
//! requested chain; everything after that is fails-soft per field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chain::{normalize_address, validate_address};
use crate::domain::numeric::parse_numeric_unit;
use crate::domain::{Chain, TokenListingSnapshot};
use crate::ports::RowLayout;

use super::dollar_values::{extract_dollar_values, DOLLAR_MARKER};
use super::layouts::layout_for_chain;
use super::tokenizer::tokenize;

/// Default site prefix for snapshot URLs
pub const DEFAULT_LISTING_BASE_URL: &str = "https://dexscreener.com";

/// One scraped listing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListingRow {
    /// Row link, `/{chain}/{pairAddress}` with an optional query
    pub href: String,
    /// Row text with DOM-node boundaries rendered as `|`
    pub text: String,
}

impl RawListingRow {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Why a row was not normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("Link '{href}' does not point to a {chain} pair")]
    ChainMismatch { href: String, chain: Chain },

    #[error("Address '{address}' has length {actual}, expected {expected} for {chain}")]
    AddressLength {
        address: String,
        actual: usize,
        expected: usize,
        chain: Chain,
    },

    #[error("Address '{address}' is not a valid {chain} address")]
    AddressAlphabet { address: String, chain: Chain },
}

impl RowRejection {
    /// Short label used when counting rejections
    pub fn kind(&self) -> &'static str {
        match self {
            RowRejection::ChainMismatch { .. } => "chain_mismatch",
            RowRejection::AddressLength { .. } => "address_length",
            RowRejection::AddressAlphabet { .. } => "address_alphabet",
        }
    }
}

/// Normalizes listing rows for a single chain
pub struct ListingRowNormalizer {
    chain: Chain,
    layout: Box<dyn RowLayout>,
    base_url: String,
}

impl std::fmt::Debug for ListingRowNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingRowNormalizer")
            .field("chain", &self.chain)
            .field("layout", &self.layout.version())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ListingRowNormalizer {
    /// Normalizer using the chain's default layout
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            layout: layout_for_chain(chain),
            base_url: DEFAULT_LISTING_BASE_URL.to_string(),
        }
    }

    /// Replace the row layout
    pub fn with_layout(mut self, layout: Box<dyn RowLayout>) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the URL prefix used for snapshot links
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn layout_version(&self) -> &'static str {
        self.layout.version()
    }

    /// Extract and validate the pair address from a row link
    pub fn pair_address_from_href<'a>(&self, href: &'a str) -> Result<&'a str, RowRejection> {
        let prefix = format!("/{}/", self.chain.slug());
        let start = href
            .rfind(&prefix)
            .map(|i| i + prefix.len())
            .ok_or_else(|| RowRejection::ChainMismatch {
                href: href.to_string(),
                chain: self.chain,
            })?;

        let tail = &href[start..];
        let address = tail.split(['?', '#']).next().unwrap_or(tail);

        let expected = self.chain.family().address_len();
        if address.len() != expected {
            return Err(RowRejection::AddressLength {
                address: address.to_string(),
                actual: address.len(),
                expected,
                chain: self.chain,
            });
        }
        if !validate_address(address, self.chain) {
            return Err(RowRejection::AddressAlphabet {
                address: address.to_string(),
                chain: self.chain,
            });
        }
        Ok(address)
    }

    /// Normalize a row, reporting why it was rejected
    pub fn try_normalize(
        &self,
        row: &RawListingRow,
        rank: u32,
    ) -> Result<TokenListingSnapshot, RowRejection> {
        let address = self.pair_address_from_href(&row.href)?;
        let tokens = tokenize(&row.text);

        let identity = self.layout.identity(&tokens);
        let price_change = self
            .layout
            .percent_window()
            .detect(&tokens)
            .unwrap_or_default();
        let dollars = extract_dollar_values(&tokens);
        let volume_24h = volume_in_window(&tokens, self.layout.volume_window());

        let href = row.href.split('?').next().unwrap_or(&row.href);

        Ok(TokenListingSnapshot {
            pair_address: normalize_address(address, self.chain),
            chain: self.chain,
            rank,
            url: format!("{}{}", self.base_url, href),
            token_name: identity.token_name,
            token_symbol: identity.token_symbol,
            base_token: identity.base_token,
            dex_type: identity.dex_type,
            price_usd: dollars.price,
            price_change,
            market_cap: dollars.market_cap(),
            liquidity_usd: dollars.liquidity(),
            fdv: dollars.fdv(),
            volume_24h,
        })
    }

    /// Normalize a row; rows that do not belong to the chain yield `None`
    pub fn normalize(&self, row: &RawListingRow, rank: u32) -> Option<TokenListingSnapshot> {
        match self.try_normalize(row, rank) {
            Ok(snapshot) => Some(snapshot),
            Err(rejection) => {
                tracing::debug!(rank, reason = rejection.kind(), "Rejected listing row: {}", rejection);
                None
            }
        }
    }
}

/// First thousands-separated, non-dollar amount inside `window`
fn volume_in_window(tokens: &[&str], window: std::ops::Range<usize>) -> Option<Decimal> {
    let end = window.end.min(tokens.len());
    let start = window.start.min(end);

    tokens[start..end]
        .iter()
        .filter(|token| token.contains(',') && !token.contains(DOLLAR_MARKER))
        .find_map(|token| parse_numeric_unit(token))
}
