//! Listing Row Layout Port
//!
//! A scraped listing row is a positional token sequence, so every offset the
//! normalizer reads is tied to one snapshot of the upstream page layout.
//! Those assumptions live behind these traits: when the page changes, a new
//! layout implementation is swapped in and callers stay untouched.

use std::ops::Range;

use crate::domain::PriceChangeWindow;

/// Identity fields read from fixed offsets of a row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIdentity {
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub base_token: Option<String>,
    pub dex_type: Option<String>,
}

/// Locates the time-bucketed percentage changes in a row
pub trait PercentWindowStrategy: Send + Sync {
    /// Returns `None` unless all four buckets can be assigned
    fn detect(&self, tokens: &[&str]) -> Option<PriceChangeWindow>;
}

/// Positional layout of one upstream listing page version
pub trait RowLayout: Send + Sync {
    /// Stable identifier, also used for selection in configuration
    fn version(&self) -> &'static str;

    /// Read name/symbol/base-token from their fixed offsets
    fn identity(&self, tokens: &[&str]) -> RowIdentity;

    /// Strategy for the 5m/1h/6h/24h percentage block
    fn percent_window(&self) -> &dyn PercentWindowStrategy;

    /// Token index range searched for the thousands-separated volume
    fn volume_window(&self) -> Range<usize> {
        10..15
    }
}
