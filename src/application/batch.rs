//! Batch Normalization
//!
//! Runs the normalizers over many inputs. One bad input never stops the
//! batch; every outcome is counted in a `BatchReport` so degraded fields
//! and rejected inputs stay visible in aggregate.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::adapters::listing::{ListingRowNormalizer, RawListingRow};
use crate::adapters::pair_detail::{PairDetailError, PairDetailNormalizer};
use crate::domain::{TokenListingSnapshot, TokenPairSnapshot};

/// Rejection reason for an input line that is not valid JSON
pub const INVALID_JSON: &str = "invalid_json";

/// Rejection reason for a pair whose target token cannot be identified
pub const AMBIGUOUS_IDENTITY: &str = "ambiguous_identity";

/// Aggregate counts for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Inputs seen
    pub processed: usize,
    /// Snapshots produced
    pub snapshots: usize,
    /// Pairs reported as not found
    pub not_found: usize,
    /// Rejected inputs by reason
    pub rejections: BTreeMap<String, usize>,
    /// Unset field counts across produced snapshots
    pub null_fields: BTreeMap<String, usize>,
}

impl BatchReport {
    pub fn record_rejection(&mut self, kind: &str) {
        *self.rejections.entry(kind.to_string()).or_default() += 1;
    }

    fn record_snapshot<S: AsRef<str>>(&mut self, missing: impl IntoIterator<Item = S>) {
        self.snapshots += 1;
        for field in missing {
            *self.null_fields.entry(field.as_ref().to_string()).or_default() += 1;
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    /// Log the summary at info level
    pub fn log_summary(&self, source: &str) {
        tracing::info!(
            source,
            processed = self.processed,
            snapshots = self.snapshots,
            rejected = self.rejected(),
            not_found = self.not_found,
            "Batch normalized"
        );
        for (kind, count) in &self.rejections {
            tracing::info!(source, kind = %kind, count, "Rejections");
        }
        for (field, count) in &self.null_fields {
            tracing::debug!(source, field = %field, count, "Unset field");
        }
    }
}

/// Snapshots and report of one batch
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub snapshots: Vec<T>,
    pub report: BatchReport,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            report: BatchReport::default(),
        }
    }
}

impl BatchOutcome<TokenListingSnapshot> {
    fn push_row(&mut self, normalizer: &ListingRowNormalizer, row: &RawListingRow) {
        self.report.processed += 1;
        let rank = u32::try_from(self.report.processed).unwrap_or(u32::MAX);
        match normalizer.try_normalize(row, rank) {
            Ok(snapshot) => {
                self.report.record_snapshot(snapshot.missing_fields());
                self.snapshots.push(snapshot);
            }
            Err(rejection) => {
                tracing::debug!(rank, reason = %rejection, "Listing row rejected");
                self.report.record_rejection(rejection.kind());
            }
        }
    }
}

/// Normalize listing rows in page order; rank is the 1-based row position
pub fn normalize_listing_batch(
    normalizer: &ListingRowNormalizer,
    rows: &[RawListingRow],
) -> BatchOutcome<TokenListingSnapshot> {
    let mut outcome = BatchOutcome::default();
    for row in rows {
        outcome.push_row(normalizer, row);
    }
    outcome
}

/// Normalize JSON-encoded listing rows, one per line
///
/// Blank lines are skipped. A line that is not a row still takes a rank.
pub fn normalize_listing_lines<'a, I>(
    normalizer: &ListingRowNormalizer,
    lines: I,
) -> BatchOutcome<TokenListingSnapshot>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = BatchOutcome::default();
    for line in lines.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<RawListingRow>(line) {
            Ok(row) => outcome.push_row(normalizer, &row),
            Err(e) => {
                outcome.report.processed += 1;
                tracing::debug!(error = %e, "Skipping malformed listing line");
                outcome.report.record_rejection(INVALID_JSON);
            }
        }
    }
    outcome
}

/// Normalize pair-detail response bodies, one per item
pub fn normalize_pair_batch<'a, I>(
    normalizer: &PairDetailNormalizer,
    bodies: I,
) -> BatchOutcome<TokenPairSnapshot>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcome = BatchOutcome::default();
    for body in bodies.into_iter().map(str::trim).filter(|b| !b.is_empty()) {
        outcome.report.processed += 1;
        match normalizer.normalize_str(body) {
            Ok(Some(snapshot)) => {
                outcome.report.record_snapshot(snapshot.missing_fields());
                outcome.snapshots.push(snapshot);
            }
            Ok(None) => outcome.report.not_found += 1,
            Err(PairDetailError::InvalidJson(e)) => {
                tracing::debug!(error = %e, "Skipping malformed pair detail body");
                outcome.report.record_rejection(INVALID_JSON);
            }
            Err(e @ PairDetailError::AmbiguousIdentity { .. }) => {
                tracing::debug!(error = %e, "Pair detail rejected");
                outcome.report.record_rejection(AMBIGUOUS_IDENTITY);
            }
        }
    }
    outcome
}
