//! Listing Row Adapter
//!
//! Normalizes rows scraped from a DEX listing table. A row arrives as its
//! link (`/{chain}/{pairAddress}`) and its DOM text joined with `|`.
//!
//! Pipeline per row:
//! - `tokenizer`: split the flattened text into ordered tokens
//! - `layouts`: read identity fields from the version's fixed offsets
//! - `percent_window`: find the 5m/1h/6h/24h percentage block
//! - `dollar_values`: classify `$` amounts into price and aggregates
//! - `normalizer`: validate the link and assemble the snapshot

mod dollar_values;
mod layouts;
mod normalizer;
mod percent_window;
mod tokenizer;

pub use dollar_values::{extract_dollar_values, DollarValues, DOLLAR_MARKER};
pub use layouts::{
    known_layouts, layout_by_name, layout_for_chain, EvmRowLayoutV1, SolanaRowLayoutV1,
    AUTO_LAYOUT, SOLANA_DEX_TYPES,
};
pub use normalizer::{ListingRowNormalizer, RawListingRow, RowRejection, DEFAULT_LISTING_BASE_URL};
pub use percent_window::{percent_positions, ContiguousPercentWindow, DEFAULT_MAX_GAP, WINDOW_LEN};
pub use tokenizer::{tokenize, ROW_SEPARATOR};
