//! Snapshot Normalizer
//!
//! Offline CLI over captured listing rows and pair-detail responses.

use anyhow::Result;

use snapshot_normalizer::adapters::cli;

fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG and friends)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app)
}
