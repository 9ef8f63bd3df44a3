//! CLI Command Handlers
//!
//! Offline commands: read captured listing rows or pair-detail responses
//! from local JSON-lines files and write normalized snapshots to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::application::{normalize_listing_lines, normalize_pair_batch, BatchOutcome};
use crate::config::{load_config, Config};
use crate::domain::Chain;

/// Snapshot Normalizer - DEX listing and pair-detail normalization
#[derive(Parser, Debug)]
#[command(
    name = "snapshot-normalizer",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Normalize scraped DEX listing rows and pair-detail responses",
    long_about = "Reads captured listing rows or pair-detail API responses, one JSON object \
                  per line, and writes canonical market snapshots as JSON lines to stdout."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize scraped listing rows
    Listing(ListingCmd),

    /// Normalize pair-detail responses
    Pair(PairCmd),
}

/// Normalize listing rows (`{"href": ..., "text": ...}` per line)
#[derive(Parser, Debug)]
pub struct ListingCmd {
    /// Chain the rows belong to (falls back to `listing.chain` in config)
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<Chain>,

    /// JSON-lines file of scraped rows
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write the batch report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Normalize pair-detail responses (one envelope per line)
#[derive(Parser, Debug)]
pub struct PairCmd {
    /// JSON-lines file of response envelopes
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Chain assumed when a response does not name one
    #[arg(long, value_name = "CHAIN")]
    pub chain: Option<Chain>,

    /// Write the batch report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// Execute the CLI command
pub fn execute(app: CliApp) -> Result<()> {
    let config = match &app.config {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from {}", expanded))?
        }
        None => Config::default(),
    };

    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Listing(cmd) => listing_command(cmd, &config),
        Command::Pair(cmd) => pair_command(cmd, &config),
    }
}

/// Initialize logging system
///
/// `--debug` and `--verbose` win over `RUST_LOG`, which wins over the
/// configured level.
fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Handle listing command
fn listing_command(cmd: ListingCmd, config: &Config) -> Result<()> {
    let chain = match cmd.chain {
        Some(chain) => chain,
        None => config
            .listing
            .chain()?
            .context("No chain given; pass --chain or set listing.chain in config")?,
    };
    let normalizer = config.listing.normalizer(chain)?;
    tracing::info!(
        chain = %chain,
        layout = normalizer.layout_version(),
        input = %cmd.input.display(),
        "Normalizing listing rows"
    );

    let content = read_input(&cmd.input)?;
    let outcome = normalize_listing_lines(&normalizer, content.lines());
    finish("listing", outcome, cmd.report.as_deref())
}

/// Handle pair command
fn pair_command(cmd: PairCmd, config: &Config) -> Result<()> {
    let normalizer = config.pair_detail.normalizer(cmd.chain)?;
    tracing::info!(
        policy = ?normalizer.policy(),
        input = %cmd.input.display(),
        "Normalizing pair detail responses"
    );

    let content = read_input(&cmd.input)?;
    let outcome = normalize_pair_batch(&normalizer, content.lines());
    finish("pair_detail", outcome, cmd.report.as_deref())
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))
}

/// Print snapshots as JSON lines, log the summary, optionally save the report
fn finish<T: Serialize>(source: &str, outcome: BatchOutcome<T>, report_path: Option<&Path>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for snapshot in &outcome.snapshots {
        serde_json::to_writer(&mut out, snapshot).context("Failed to encode snapshot")?;
        writeln!(out)?;
    }
    out.flush().context("Failed to write snapshots")?;

    outcome.report.log_summary(source);

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&outcome.report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_app_parse_listing() {
        let args = vec!["snapshot-normalizer", "listing", "--chain", "bsc", "--input", "rows.jsonl"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Listing(cmd) => {
                assert_eq!(cmd.chain, Some(Chain::Bsc));
                assert_eq!(cmd.input, PathBuf::from("rows.jsonl"));
                assert!(cmd.report.is_none());
            }
            _ => panic!("Expected Listing command"),
        }
    }

    #[test]
    fn test_cli_app_parse_listing_chain_alias() {
        let args = vec!["snapshot-normalizer", "listing", "--chain", "SOL", "-i", "rows.jsonl"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Listing(cmd) => assert_eq!(cmd.chain, Some(Chain::Solana)),
            _ => panic!("Expected Listing command"),
        }
    }

    #[test]
    fn test_cli_app_parse_unknown_chain() {
        let args = vec!["snapshot-normalizer", "listing", "--chain", "fantom", "-i", "rows.jsonl"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_app_parse_pair() {
        let args = vec![
            "snapshot-normalizer",
            "pair",
            "--input",
            "pairs.jsonl",
            "--report",
            "report.json",
            "--config",
            "config/default.toml",
            "--debug",
        ];
        let app = CliApp::try_parse_from(args).unwrap();

        assert!(app.debug);
        assert_eq!(app.config, Some(PathBuf::from("config/default.toml")));
        match app.command {
            Command::Pair(cmd) => {
                assert_eq!(cmd.chain, None);
                assert_eq!(cmd.report, Some(PathBuf::from("report.json")));
            }
            _ => panic!("Expected Pair command"),
        }
    }

    #[test]
    fn test_cli_app_requires_input() {
        let args = vec!["snapshot-normalizer", "pair"];
        assert!(CliApp::try_parse_from(args).is_err());
    }
}
