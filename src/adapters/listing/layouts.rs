//! Versioned Listing Layouts
//!
//! Offsets below describe the listing table as rendered at the time each
//! layout was written. A new page version gets a new layout, not an edit.

use crate::domain::numeric::{has_magnitude_suffix, is_percent_token};
use crate::domain::Chain;
use crate::ports::{PercentWindowStrategy, RowIdentity, RowLayout};

use super::dollar_values::DOLLAR_MARKER;
use super::percent_window::ContiguousPercentWindow;

/// Layout name that selects the per-chain default
pub const AUTO_LAYOUT: &str = "auto";

/// Pool type markers that Solana rows insert before the symbol
pub const SOLANA_DEX_TYPES: [&str; 8] = ["CPMM", "CLMM", "DLMM", "DYN", "DYN2", "wp", "v2", "v3"];

/// Identity tokens must not look like row data
///
/// A `$` node, a `$`-prefixed amount, a percentage or a magnitude amount at
/// an identity offset means the layout has drifted; the field is left unset
/// instead. Symbols such as `$TRUMP` are kept.
fn identity_token(tokens: &[&str], index: usize) -> Option<String> {
    let token = *tokens.get(index)?;
    let looks_like_data = token == DOLLAR_MARKER
        || token
            .strip_prefix('$')
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        || is_percent_token(token)
        || (has_magnitude_suffix(token) && token.chars().next().is_some_and(|c| c.is_ascii_digit()));

    if looks_like_data {
        tracing::debug!(index, token, "Identity offset holds data token, leaving unset");
        None
    } else {
        Some(token.to_string())
    }
}

/// EVM listing rows: name at 3, base token at 5, symbol at 6
#[derive(Debug, Clone, Default)]
pub struct EvmRowLayoutV1 {
    percent: ContiguousPercentWindow,
}

impl EvmRowLayoutV1 {
    pub const VERSION: &'static str = "evm-v1";
    const NAME_IDX: usize = 3;
    const BASE_IDX: usize = 5;
    const SYMBOL_IDX: usize = 6;
}

impl RowLayout for EvmRowLayoutV1 {
    fn version(&self) -> &'static str {
        Self::VERSION
    }

    fn identity(&self, tokens: &[&str]) -> RowIdentity {
        if tokens.len() <= Self::SYMBOL_IDX {
            return RowIdentity::default();
        }
        RowIdentity {
            token_name: identity_token(tokens, Self::NAME_IDX),
            base_token: identity_token(tokens, Self::BASE_IDX),
            token_symbol: identity_token(tokens, Self::SYMBOL_IDX),
            dex_type: None,
        }
    }

    fn percent_window(&self) -> &dyn PercentWindowStrategy {
        &self.percent
    }
}

/// Solana listing rows: symbol at 2, base token at 4, name at 5,
/// all shifted by one when a pool type marker sits at 2
#[derive(Debug, Clone, Default)]
pub struct SolanaRowLayoutV1 {
    percent: ContiguousPercentWindow,
}

impl SolanaRowLayoutV1 {
    pub const VERSION: &'static str = "solana-v1";
    const MARKER_IDX: usize = 2;
    const SYMBOL_IDX: usize = 2;
    const BASE_IDX: usize = 4;
    const NAME_IDX: usize = 5;
}

impl RowLayout for SolanaRowLayoutV1 {
    fn version(&self) -> &'static str {
        Self::VERSION
    }

    fn identity(&self, tokens: &[&str]) -> RowIdentity {
        let dex_type = tokens
            .get(Self::MARKER_IDX)
            .copied()
            .filter(|t| SOLANA_DEX_TYPES.contains(t))
            .map(|t| t.to_string());
        let offset = usize::from(dex_type.is_some());

        if tokens.len() <= Self::NAME_IDX + offset {
            return RowIdentity {
                dex_type,
                ..RowIdentity::default()
            };
        }

        RowIdentity {
            token_symbol: identity_token(tokens, Self::SYMBOL_IDX + offset),
            base_token: identity_token(tokens, Self::BASE_IDX + offset),
            token_name: identity_token(tokens, Self::NAME_IDX + offset),
            dex_type,
        }
    }

    fn percent_window(&self) -> &dyn PercentWindowStrategy {
        &self.percent
    }
}

/// Default layout for a chain
pub fn layout_for_chain(chain: Chain) -> Box<dyn RowLayout> {
    if chain.is_evm() {
        Box::new(EvmRowLayoutV1::default())
    } else {
        Box::new(SolanaRowLayoutV1::default())
    }
}

/// Look up a layout by version name; `auto` picks the chain default
pub fn layout_by_name(name: &str, chain: Chain) -> Option<Box<dyn RowLayout>> {
    match name {
        AUTO_LAYOUT => Some(layout_for_chain(chain)),
        EvmRowLayoutV1::VERSION => Some(Box::new(EvmRowLayoutV1::default())),
        SolanaRowLayoutV1::VERSION => Some(Box::new(SolanaRowLayoutV1::default())),
        _ => None,
    }
}

/// Names accepted by [`layout_by_name`]
pub fn known_layouts() -> [&'static str; 3] {
    [AUTO_LAYOUT, EvmRowLayoutV1::VERSION, SolanaRowLayoutV1::VERSION]
}
