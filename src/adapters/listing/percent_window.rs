//! Percent Window Detector
//!
//! Listing rows render the 5m/1h/6h/24h changes as four adjacent percentage
//! cells, occasionally split by a separator node. Other percentages (tax,
//! holder share) can appear elsewhere in the row, so the detector looks for
//! the first run of four percentages that sit close together.

use rust_decimal::Decimal;

use crate::domain::numeric::{is_percent_token, parse_percent};
use crate::domain::PriceChangeWindow;
use crate::ports::PercentWindowStrategy;

/// Number of buckets in a listing percentage block
pub const WINDOW_LEN: usize = 4;

/// Default maximum position delta between consecutive entries
pub const DEFAULT_MAX_GAP: usize = 2;

/// First run of four percentages with consecutive position deltas <= `max_gap`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContiguousPercentWindow {
    pub max_gap: usize,
}

impl Default for ContiguousPercentWindow {
    fn default() -> Self {
        Self {
            max_gap: DEFAULT_MAX_GAP,
        }
    }
}

impl ContiguousPercentWindow {
    pub fn new(max_gap: usize) -> Self {
        Self { max_gap }
    }
}

/// Parsed percentage tokens as `(position, value)` in encounter order
pub fn percent_positions(tokens: &[&str]) -> Vec<(usize, Decimal)> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_percent_token(token))
        .filter_map(|(i, token)| parse_percent(token).map(|value| (i, value)))
        .collect()
}

impl PercentWindowStrategy for ContiguousPercentWindow {
    fn detect(&self, tokens: &[&str]) -> Option<PriceChangeWindow> {
        let positions = percent_positions(tokens);

        let window = positions.windows(WINDOW_LEN).find(|run| {
            run.windows(2)
                .all(|pair| pair[1].0 - pair[0].0 <= self.max_gap)
        })?;

        Some(PriceChangeWindow::from_values([
            window[0].1,
            window[1].1,
            window[2].1,
            window[3].1,
        ]))
    }
}
