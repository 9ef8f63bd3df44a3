//! Numeric Unit Parsing
//!
//! Fails-soft conversion of upstream text and JSON values into `Decimal`.
//! Every parser here returns `None` for "no value": empty input, the `--`
//! placeholder and unparsable text all collapse to the same result. Zero is
//! only ever returned for an actual zero.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

/// Placeholder rendered by listing pages for absent values
pub const NO_VALUE_PLACEHOLDER: &str = "--";

/// Magnitude suffixes and their multipliers
const MAGNITUDES: [(char, Decimal); 3] = [
    ('K', dec!(1000)),
    ('M', dec!(1000000)),
    ('B', dec!(1000000000)),
];

fn magnitude_of(suffix: char) -> Option<Decimal> {
    MAGNITUDES
        .iter()
        .find(|(s, _)| *s == suffix)
        .map(|(_, m)| *m)
}

/// Parse a plain or scientific decimal literal
fn parse_decimal_literal(text: &str) -> Option<Decimal> {
    if text.is_empty() || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Whether a token ends in a K/M/B magnitude suffix
pub fn has_magnitude_suffix(text: &str) -> bool {
    text.trim()
        .chars()
        .last()
        .map(|c| magnitude_of(c).is_some())
        .unwrap_or(false)
}

/// Whether a token is a non-empty run of ASCII digits
pub fn is_plain_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Parse a value such as `$1,234.5`, `2.3M` or `85K`
///
/// Commas and `$` are stripped. A trailing K/M/B multiplies the numeric
/// prefix by 10^3/10^6/10^9.
pub fn parse_numeric_unit(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NO_VALUE_PLACEHOLDER {
        return None;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '$').collect();
    let cleaned = cleaned.trim();

    match cleaned.chars().last().and_then(magnitude_of) {
        Some(multiplier) => {
            let prefix = &cleaned[..cleaned.len() - 1];
            parse_decimal_literal(prefix.trim())?.checked_mul(multiplier)
        }
        None => parse_decimal_literal(cleaned),
    }
}

/// Whether a token is a percentage candidate (a `%` plus at least one digit)
pub fn is_percent_token(text: &str) -> bool {
    text.contains('%') && text.chars().any(|c| c.is_ascii_digit())
}

/// Parse a percentage token such as `+12.3%`, `-1.1%` or `1,788%`
pub fn parse_percent(text: &str) -> Option<Decimal> {
    if !is_percent_token(text) {
        return None;
    }
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '%' | '+' | ','))
        .collect();
    parse_decimal_literal(cleaned.trim())
}

/// Coerce a JSON number or numeric string into a decimal
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_literal(&n.to_string()),
        Value::String(s) => parse_decimal_literal(s.trim()),
        _ => None,
    }
}

/// Coerce a JSON value into a non-negative integer count
pub fn count_from_json(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Interpret a JSON value as Unix-epoch seconds
///
/// Zero, negative, missing and non-numeric values are no value.
pub fn epoch_from_json(value: &Value) -> Option<DateTime<Utc>> {
    let seconds = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    if seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0)
}
