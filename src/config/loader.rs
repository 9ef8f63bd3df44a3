//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section is
//! optional; a missing file section falls back to its defaults.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::adapters::listing::{
    known_layouts, layout_by_name, ListingRowNormalizer, AUTO_LAYOUT, DEFAULT_LISTING_BASE_URL,
};
use crate::adapters::pair_detail::{AmbiguousIdentityPolicy, PairDetailNormalizer};
use crate::domain::Chain;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listing: ListingSection,
    pub pair_detail: PairDetailSection,
    pub logging: LoggingSection,
}

/// Listing row normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingSection {
    /// Chain rows are expected to belong to; overridden by `--chain`
    pub chain: Option<String>,
    /// Prefix for snapshot URLs
    pub base_url: String,
    /// Row layout version, or "auto" for the chain default
    pub layout: String,
}

impl Default for ListingSection {
    fn default() -> Self {
        Self {
            chain: None,
            base_url: DEFAULT_LISTING_BASE_URL.to_string(),
            layout: AUTO_LAYOUT.to_string(),
        }
    }
}

/// Pair detail normalization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PairDetailSection {
    /// Chain assumed when a payload does not name one
    pub default_chain: Option<String>,
    /// "assume_token1" or "reject"
    pub ambiguous_identity: AmbiguousIdentityPolicy,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn parse_chain(field: &str, value: &str) -> Result<Chain, ConfigError> {
    value
        .parse()
        .map_err(|e| ConfigError::ValidationError(format!("{}: {}", field, e)))
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(chain) = &self.listing.chain {
            parse_chain("listing.chain", chain)?;
        }

        if self.listing.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "listing.base_url cannot be empty".to_string(),
            ));
        }

        if !known_layouts().contains(&self.listing.layout.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "listing.layout must be one of {:?}, got {}",
                known_layouts(),
                self.listing.layout
            )));
        }

        if let Some(chain) = &self.pair_detail.default_chain {
            parse_chain("pair_detail.default_chain", chain)?;
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got {}",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }
}

impl ListingSection {
    /// Configured chain, if any
    pub fn chain(&self) -> Result<Option<Chain>, ConfigError> {
        self.chain
            .as_deref()
            .map(|c| parse_chain("listing.chain", c))
            .transpose()
    }

    /// Build a row normalizer for `chain` with this section's layout and base URL
    pub fn normalizer(&self, chain: Chain) -> Result<ListingRowNormalizer, ConfigError> {
        let layout = layout_by_name(&self.layout, chain).ok_or_else(|| {
            ConfigError::ValidationError(format!("Unknown listing layout: {}", self.layout))
        })?;
        Ok(ListingRowNormalizer::new(chain)
            .with_layout(layout)
            .with_base_url(&self.base_url))
    }
}

impl PairDetailSection {
    /// Build a pair normalizer; `chain_override` wins over `default_chain`
    pub fn normalizer(&self, chain_override: Option<Chain>) -> Result<PairDetailNormalizer, ConfigError> {
        let mut normalizer = PairDetailNormalizer::new().with_policy(self.ambiguous_identity);

        let default_chain = match chain_override {
            Some(chain) => Some(chain),
            None => self
                .default_chain
                .as_deref()
                .map(|c| parse_chain("pair_detail.default_chain", c))
                .transpose()?,
        };
        if let Some(chain) = default_chain {
            normalizer = normalizer.with_default_chain(chain);
        }
        Ok(normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[listing]
chain = "bsc"
base_url = "https://dexscreener.com/"
layout = "auto"

[pair_detail]
default_chain = "solana"
ambiguous_identity = "reject"

[logging]
level = "info"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.listing.chain().unwrap(), Some(Chain::Bsc));
        assert_eq!(config.listing.layout, "auto");
        assert_eq!(config.pair_detail.ambiguous_identity, AmbiguousIdentityPolicy::Reject);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.listing.chain, None);
        assert_eq!(config.listing.base_url, DEFAULT_LISTING_BASE_URL);
        assert_eq!(config.listing.layout, AUTO_LAYOUT);
        assert_eq!(config.pair_detail.ambiguous_identity, AmbiguousIdentityPolicy::AssumeToken1);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[listing\nchain = ");
        assert!(matches!(load_config(file.path()), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_chain_rejected() {
        let file = write_config("[listing]\nchain = \"fantom\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let file = write_config("[listing]\nlayout = \"evm-v9\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let file = write_config("[pair_detail]\nambiguous_identity = \"guess\"\n");
        assert!(matches!(load_config(file.path()), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let file = write_config("[listing]\nbase_url = \"  \"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let file = write_config("[logging]\nlevel = \"loud\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_listing_normalizer_from_section() {
        let section = ListingSection {
            layout: "solana-v1".to_string(),
            ..Default::default()
        };
        let normalizer = section.normalizer(Chain::Bsc).unwrap();
        assert_eq!(normalizer.chain(), Chain::Bsc);
        assert_eq!(normalizer.layout_version(), "solana-v1");
    }

    #[test]
    fn test_pair_normalizer_override() {
        let section = PairDetailSection {
            default_chain: Some("solana".to_string()),
            ambiguous_identity: AmbiguousIdentityPolicy::Reject,
        };
        let normalizer = section.normalizer(None).unwrap();
        assert_eq!(normalizer.policy(), AmbiguousIdentityPolicy::Reject);

        let bad = PairDetailSection {
            default_chain: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(bad.normalizer(None).is_err());
        assert!(bad.normalizer(Some(Chain::Bsc)).is_ok());
    }
}
