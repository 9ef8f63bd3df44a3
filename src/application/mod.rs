pub mod batch;

pub use batch::{
    normalize_listing_batch, normalize_listing_lines, normalize_pair_batch, BatchOutcome,
    BatchReport, AMBIGUOUS_IDENTITY, INVALID_JSON,
};
