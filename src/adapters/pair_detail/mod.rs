//! Pair Detail Adapter
//!
//! Normalizes pair-detail API responses. The `data` object is decoded once
//! into an explicit record (`types`) and then mapped onto the snapshot
//! (`normalizer`) with the pair's target token resolved.

mod normalizer;
mod types;

pub use normalizer::{
    parse_pair_detail, AmbiguousIdentityPolicy, PairDetailError, PairDetailNormalizer,
    DEFAULT_PAIR_CHAIN,
};
pub use types::{PairDetailData, PairSide};
