//! Adapters Layer - Source-specific normalizers and the CLI
//!
//! - Listing: scraped DEX listing rows
//! - Pair Detail: pair-detail API response envelopes
//! - CLI: offline command-line interface over captured inputs

pub mod cli;
pub mod listing;
pub mod pair_detail;

pub use cli::CliApp;
pub use listing::{ListingRowNormalizer, RawListingRow, RowRejection};
pub use pair_detail::{parse_pair_detail, AmbiguousIdentityPolicy, PairDetailError, PairDetailNormalizer};
