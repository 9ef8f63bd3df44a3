//! CLI Adapter
//!
//! Command-line interface for the snapshot normalizer.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, ListingCmd, PairCmd};

use anyhow::Result;

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub fn execute(app: CliApp) -> Result<()> {
    commands::execute(app)
}
