//! Dollar Value Extractor
//!
//! Every `$` node in a listing row is followed by its amount. Amounts with a
//! K/M/B suffix are aggregates and appear in a fixed order: market cap,
//! liquidity, fully-diluted value. An amount without a suffix is the price.
//!
//! Sub-cent prices use a compact rendering split over three nodes:
//! `0.0` | zero count | significant digits, so `0.0|4|9152` is `0.00009152`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::numeric::{has_magnitude_suffix, is_plain_digits, parse_numeric_unit};

/// Currency marker node
pub const DOLLAR_MARKER: &str = "$";

/// Lead node of the compact sub-cent price rendering
const COMPACT_PRICE_LEAD: &str = "0.0";

/// Largest zero count a `Decimal` can still hold alongside a significant digit
const MAX_COMPACT_ZEROS: usize = 27;

/// Values collected from the `$` nodes of a row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DollarValues {
    /// First resolved price candidate
    pub price: Option<Decimal>,
    /// Magnitude-suffixed amounts in encounter order
    pub aggregates: Vec<Decimal>,
}

impl DollarValues {
    pub fn market_cap(&self) -> Option<Decimal> {
        self.aggregates.first().copied()
    }

    pub fn liquidity(&self) -> Option<Decimal> {
        self.aggregates.get(1).copied()
    }

    pub fn fdv(&self) -> Option<Decimal> {
        self.aggregates.get(2).copied()
    }
}

/// Rebuild `0.` + zeros + digits from the compact rendering
fn compact_price(zero_count: &str, significant: &str) -> Option<Decimal> {
    let zeros: usize = zero_count.parse().ok()?;
    if zeros > MAX_COMPACT_ZEROS {
        return None;
    }
    let literal = format!("0.{}{}", "0".repeat(zeros), significant);
    Decimal::from_str(&literal).ok()
}

/// Resolve the price candidate that follows the `$` at `marker`
fn price_candidate(tokens: &[&str], marker: usize) -> Option<Decimal> {
    let first = *tokens.get(marker + 1)?;

    if first == COMPACT_PRICE_LEAD {
        if let (Some(zeros), Some(digits)) = (tokens.get(marker + 2), tokens.get(marker + 3)) {
            if is_plain_digits(zeros) && is_plain_digits(digits) {
                return compact_price(zeros, digits);
            }
        }
    }

    parse_numeric_unit(first)
}

/// Scan the row for `$` markers and classify the amount after each one
pub fn extract_dollar_values(tokens: &[&str]) -> DollarValues {
    let mut values = DollarValues::default();

    for (i, token) in tokens.iter().enumerate() {
        if *token != DOLLAR_MARKER {
            continue;
        }
        let Some(next) = tokens.get(i + 1) else {
            continue;
        };

        if has_magnitude_suffix(next) {
            match parse_numeric_unit(next) {
                Some(amount) => values.aggregates.push(amount),
                None => tracing::debug!(token = %next, "Skipping malformed dollar aggregate"),
            }
        } else if values.price.is_none() {
            values.price = price_candidate(tokens, i);
        }
    }

    values
}
