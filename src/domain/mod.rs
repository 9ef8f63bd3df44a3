//! Domain Layer - Snapshot records and the rules shared by every source
//!
//! Pure types and functions with no I/O:
//! - `chain`: chain catalogue, address families and canonicalization
//! - `numeric`: display-number parsing (K/M/B amounts, percentages, JSON scalars)
//! - `snapshot`: the normalized listing and pair records

pub mod chain;
pub mod numeric;
pub mod snapshot;

pub use chain::{
    addresses_match, normalize_address, validate_address, AddressFamily, Chain, ChainParseError,
};
pub use snapshot::{
    IdentityResolution, PriceChangeWindow, TimeBuckets, TokenListingSnapshot, TokenPairSnapshot,
};
