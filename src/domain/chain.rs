//! Chains and Address Canonicalization
//!
//! Two address families show up in upstream data:
//! - Hex/EVM: `0x` + 40 hex digits, case-insensitive. Canonical form is lowercase.
//! - Base58 (Solana): 44 characters, case-sensitive. Canonical form is the input itself.
//!
//! Canonicalization is deterministic per family and idempotent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a hex/EVM address including the `0x` prefix
pub const EVM_ADDRESS_LEN: usize = 42;

/// Length of a base58 address as rendered in listing links
pub const BASE58_ADDRESS_LEN: usize = 44;

/// Decoded size of a base58 account address
const BASE58_ADDRESS_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown chain: {0}")]
pub struct ChainParseError(pub String);

/// Address family of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFamily {
    /// `0x`-prefixed hex, case carries no information
    Evm,
    /// Base58, case carries information
    Base58,
}

impl AddressFamily {
    /// Expected address length for this family
    pub fn address_len(&self) -> usize {
        match self {
            AddressFamily::Evm => EVM_ADDRESS_LEN,
            AddressFamily::Base58 => BASE58_ADDRESS_LEN,
        }
    }

    /// Canonical form of an address in this family
    pub fn canonicalize(&self, address: &str) -> String {
        match self {
            AddressFamily::Evm => address.to_ascii_lowercase(),
            AddressFamily::Base58 => address.to_string(),
        }
    }

    /// Check length and alphabet for this family
    pub fn is_valid_address(&self, address: &str) -> bool {
        if address.len() != self.address_len() {
            return false;
        }
        match self {
            AddressFamily::Evm => {
                address.starts_with("0x")
                    && address[2..].chars().all(|c| c.is_ascii_hexdigit())
            }
            AddressFamily::Base58 => bs58::decode(address)
                .into_vec()
                .map(|bytes| bytes.len() == BASE58_ADDRESS_BYTES)
                .unwrap_or(false),
        }
    }
}

/// Supported chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Bsc,
    Ethereum,
    Polygon,
    Arbitrum,
    Optimism,
    Avalanche,
    Base,
    Solana,
}

impl Chain {
    pub const ALL: [Chain; 8] = [
        Chain::Bsc,
        Chain::Ethereum,
        Chain::Polygon,
        Chain::Arbitrum,
        Chain::Optimism,
        Chain::Avalanche,
        Chain::Base,
        Chain::Solana,
    ];

    pub fn family(&self) -> AddressFamily {
        match self {
            Chain::Solana => AddressFamily::Base58,
            _ => AddressFamily::Evm,
        }
    }

    /// Path segment used in listing links (`/{slug}/{pair}`)
    pub fn slug(&self) -> &'static str {
        match self {
            Chain::Bsc => "bsc",
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
            Chain::Avalanche => "avalanche",
            Chain::Base => "base",
            Chain::Solana => "solana",
        }
    }

    pub fn is_evm(&self) -> bool {
        self.family() == AddressFamily::Evm
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Chain {
    type Err = ChainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bsc" | "bnb" => Ok(Chain::Bsc),
            "eth" | "ethereum" => Ok(Chain::Ethereum),
            "polygon" | "matic" => Ok(Chain::Polygon),
            "arbitrum" => Ok(Chain::Arbitrum),
            "optimism" => Ok(Chain::Optimism),
            "avalanche" | "avax" => Ok(Chain::Avalanche),
            "base" => Ok(Chain::Base),
            "solana" | "sol" => Ok(Chain::Solana),
            _ => Err(ChainParseError(s.to_string())),
        }
    }
}

/// Canonical form of `address` on `chain`
///
/// EVM chains lowercase the whole address; base58 chains return it unchanged.
pub fn normalize_address(address: &str, chain: Chain) -> String {
    chain.family().canonicalize(address)
}

/// Whether `address` has the length and alphabet expected on `chain`
pub fn validate_address(address: &str, chain: Chain) -> bool {
    chain.family().is_valid_address(address)
}

/// Case-insensitive address equality, used for identity matching
pub fn addresses_match(a: &str, b: &str) -> bool {
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC_SOL: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    const WBNB_MIXED: &str = "0xbB4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c";

    #[test]
    fn test_evm_lowercased() {
        assert_eq!(
            normalize_address(WBNB_MIXED, Chain::Bsc),
            "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"
        );
    }

    #[test]
    fn test_base58_unchanged() {
        assert_eq!(normalize_address(USDC_SOL, Chain::Solana), USDC_SOL);
    }

    #[test]
    fn test_normalize_idempotent() {
        for chain in Chain::ALL {
            for addr in [USDC_SOL, WBNB_MIXED, "", "0xABC"] {
                let once = normalize_address(addr, chain);
                assert_eq!(normalize_address(&once, chain), once, "{chain} {addr}");
            }
        }
    }

    #[test]
    fn test_validate_evm() {
        assert!(validate_address(WBNB_MIXED, Chain::Bsc));
        assert!(!validate_address("0xbb4c", Chain::Bsc));
        assert!(!validate_address(&WBNB_MIXED.replace("0x", "1x"), Chain::Bsc));
        assert!(!validate_address(&WBNB_MIXED.replace('c', "g"), Chain::Ethereum));
        assert!(!validate_address(USDC_SOL, Chain::Bsc));
    }

    #[test]
    fn test_validate_base58() {
        assert!(validate_address(USDC_SOL, Chain::Solana));
        // '0' is not in the base58 alphabet
        assert!(!validate_address(&USDC_SOL.replace('E', "0"), Chain::Solana));
        assert!(!validate_address(WBNB_MIXED, Chain::Solana));
    }

    #[test]
    fn test_chain_parse_aliases() {
        assert_eq!("BSC".parse::<Chain>().unwrap(), Chain::Bsc);
        assert_eq!("eth".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!("matic".parse::<Chain>().unwrap(), Chain::Polygon);
        assert_eq!(" solana ".parse::<Chain>().unwrap(), Chain::Solana);
        assert!("tron".parse::<Chain>().is_err());
    }

    #[test]
    fn test_chain_family() {
        assert!(Chain::Base.is_evm());
        assert_eq!(Chain::Solana.family(), AddressFamily::Base58);
        assert_eq!(Chain::Solana.family().address_len(), 44);
        assert_eq!(Chain::Bsc.family().address_len(), 42);
    }

    #[test]
    fn test_addresses_match() {
        assert!(addresses_match(WBNB_MIXED, &WBNB_MIXED.to_lowercase()));
        assert!(!addresses_match("", ""));
        assert!(!addresses_match(WBNB_MIXED, USDC_SOL));
    }

    #[test]
    fn test_chain_serde() {
        let json = serde_json::to_string(&Chain::Solana).unwrap();
        assert_eq!(json, "\"solana\"");
        let chain: Chain = serde_json::from_str("\"bsc\"").unwrap();
        assert_eq!(chain, Chain::Bsc);
    }
}
