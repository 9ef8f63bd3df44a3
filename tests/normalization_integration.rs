//! Normalization Integration Tests
//!
//! End-to-end checks over the public API:
//! 1. Config file -> listing normalizer -> batch of scraped rows
//! 2. Config file -> pair normalizer -> batch of captured responses
//! 3. Address canonicalization agreement between both sources
//!
//! All inputs are inline fixtures; nothing touches the network.

use std::io::Write;

use rust_decimal_macros::dec;
use serde_json::json;
use tempfile::NamedTempFile;

use snapshot_normalizer::adapters::listing::{ListingRowNormalizer, RawListingRow};
use snapshot_normalizer::adapters::pair_detail::{parse_pair_detail, PairDetailNormalizer};
use snapshot_normalizer::application::{normalize_listing_lines, normalize_pair_batch};
use snapshot_normalizer::config::load_config;
use snapshot_normalizer::domain::numeric::parse_numeric_unit;
use snapshot_normalizer::domain::{normalize_address, Chain, IdentityResolution};

// ============================================================================
// Test Fixtures
// ============================================================================

const BSC_PAIR: &str = "0x16B9a82891338f9bA80E2D6970FddA79D1eb0daE";
const WBNB: &str = "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c";
const FLOKI: &str = "0xfb5B838b6cfEEdC2873aB27866079AC55363D37E";
const SOL_PAIR: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn listing_lines() -> String {
    let rows = [
        RawListingRow::new(
            format!("/bsc/{}", BSC_PAIR),
            "#1|V2|x|Floki Inu|/|WBNB|FLOKI|$|0.0|4|9152|21h|109,759|17,731|+12.3%|-1.1%|0.4%|+5.6%|$|6.3M|$|632K|$|8.1M",
        ),
        RawListingRow::new(
            format!("/solana/{}", SOL_PAIR),
            "#2|x|WIF|/|SOL|dogwifhat|$|2.1|1%|2%|3%|4%",
        ),
        RawListingRow::new("/bsc/0xshort", "#3|V2|x|Short|/|WBNB|SHT"),
    ];
    rows.iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

fn pair_envelope(target: &str) -> String {
    json!({
        "data": {
            "pair": BSC_PAIR,
            "chain": "bsc",
            "target_token": target,
            "token0_address": WBNB,
            "token0_symbol": "WBNB",
            "token0_name": "Wrapped BNB",
            "token1_address": FLOKI,
            "token1_symbol": "FLOKI",
            "token1_name": "FLOKI",
            "token1_price_usd": "0.00009152",
            "mc": "6300000",
            "price_change_1d": 5.6,
            "first_trade_at": 1650000000
        }
    })
    .to_string()
}

// ============================================================================
// Listing Flow
// ============================================================================

#[test]
fn test_listing_flow_from_config() {
    let config = load_config(
        write_config("[listing]\nchain = \"bsc\"\nbase_url = \"https://dexscreener.com/\"\n").path(),
    )
    .unwrap();
    let chain = config.listing.chain().unwrap().unwrap();
    let normalizer = config.listing.normalizer(chain).unwrap();

    let lines = listing_lines();
    let outcome = normalize_listing_lines(&normalizer, lines.lines());

    assert_eq!(outcome.report.processed, 3);
    assert_eq!(outcome.report.snapshots, 1);
    assert_eq!(outcome.report.rejections.get("chain_mismatch"), Some(&1));
    assert_eq!(outcome.report.rejections.get("address_length"), Some(&1));

    let snap = &outcome.snapshots[0];
    assert_eq!(snap.rank, 1);
    assert_eq!(snap.pair_address, BSC_PAIR.to_lowercase());
    assert_eq!(snap.url, format!("https://dexscreener.com/bsc/{}", BSC_PAIR));
    assert_eq!(snap.token_symbol.as_deref(), Some("FLOKI"));
    assert_eq!(snap.price_usd, Some(dec!(0.00009152)));
    assert_eq!(snap.price_change.h24, Some(dec!(5.6)));
    assert_eq!(snap.fdv, Some(dec!(8100000)));
}

#[test]
fn test_listing_same_rows_on_solana() {
    let normalizer = ListingRowNormalizer::new(Chain::Solana);
    let lines = listing_lines();
    let outcome = normalize_listing_lines(&normalizer, lines.lines());

    assert_eq!(outcome.report.snapshots, 1);
    assert_eq!(outcome.report.rejections.get("chain_mismatch"), Some(&2));

    let snap = &outcome.snapshots[0];
    assert_eq!(snap.rank, 2);
    assert_eq!(snap.pair_address, SOL_PAIR);
    assert_eq!(snap.token_symbol.as_deref(), Some("WIF"));
    assert_eq!(snap.token_name.as_deref(), Some("dogwifhat"));
    assert_eq!(snap.price_usd, Some(dec!(2.1)));
}

// ============================================================================
// Pair Detail Flow
// ============================================================================

#[test]
fn test_pair_flow_with_reject_policy() {
    let config = load_config(
        write_config("[pair_detail]\nambiguous_identity = \"reject\"\n").path(),
    )
    .unwrap();
    let normalizer = config.pair_detail.normalizer(None).unwrap();

    let bodies = vec![
        pair_envelope(FLOKI),
        pair_envelope(&WBNB.to_lowercase()),
        pair_envelope("0x000000000000000000000000000000000000dEaD"),
        json!({"data": {}}).to_string(),
    ];
    let outcome = normalize_pair_batch(&normalizer, bodies.iter().map(String::as_str));

    assert_eq!(outcome.report.processed, 4);
    assert_eq!(outcome.report.snapshots, 2);
    assert_eq!(outcome.report.not_found, 1);
    assert_eq!(outcome.report.rejections.get("ambiguous_identity"), Some(&1));

    let floki = &outcome.snapshots[0];
    assert_eq!(floki.identity, IdentityResolution::Token1);
    assert_eq!(floki.token_symbol.as_deref(), Some("FLOKI"));
    assert_eq!(floki.quote_token_symbol.as_deref(), Some("WBNB"));
    assert_eq!(floki.current_market_cap, Some(dec!(6300000)));

    let wbnb = &outcome.snapshots[1];
    assert_eq!(wbnb.identity, IdentityResolution::Token0);
    assert_eq!(wbnb.token_name.as_deref(), Some("Wrapped BNB"));
}

#[test]
fn test_pair_default_policy_keeps_ambiguous_pairs() {
    let outcome = normalize_pair_batch(
        &PairDetailNormalizer::new(),
        [pair_envelope("0x000000000000000000000000000000000000dEaD").as_str()],
    );
    assert_eq!(outcome.report.snapshots, 1);
    assert_eq!(outcome.snapshots[0].identity, IdentityResolution::Defaulted);
    assert_eq!(outcome.snapshots[0].token_symbol.as_deref(), Some("FLOKI"));
}

// ============================================================================
// Cross-Source Agreement
// ============================================================================

#[test]
fn test_chainless_envelope_agrees_with_listing() {
    let mut envelope: serde_json::Value = serde_json::from_str(&pair_envelope(FLOKI)).unwrap();
    envelope["data"].as_object_mut().unwrap().remove("chain");
    let pair = parse_pair_detail(&envelope).unwrap();

    let listing = ListingRowNormalizer::new(Chain::Bsc)
        .normalize(
            &RawListingRow::new(format!("/bsc/{}", BSC_PAIR), "#1|V2|x|Floki|/|WBNB|FLOKI"),
            1,
        )
        .unwrap();

    assert_eq!(pair.pair_address, listing.pair_address);
    assert_eq!(pair.token_address.as_deref(), Some(FLOKI.to_lowercase().as_str()));
    assert_eq!(pair.quote_token_address.as_deref(), Some(WBNB.to_lowercase().as_str()));
}

#[test]
fn test_listing_and_pair_agree_on_pair_address() {
    let listing = ListingRowNormalizer::new(Chain::Bsc)
        .normalize(
            &RawListingRow::new(format!("/bsc/{}", BSC_PAIR), "#1|V2|x|Floki|/|WBNB|FLOKI"),
            1,
        )
        .unwrap();

    let envelope: serde_json::Value = serde_json::from_str(&pair_envelope(FLOKI)).unwrap();
    let pair = parse_pair_detail(&envelope).unwrap();

    assert_eq!(listing.pair_address, pair.pair_address);
    assert_eq!(pair.pair_address, normalize_address(BSC_PAIR, Chain::Bsc));
    assert_eq!(
        normalize_address(&pair.pair_address, Chain::Bsc),
        pair.pair_address
    );
}

#[test]
fn test_numeric_unit_examples() {
    assert_eq!(parse_numeric_unit("2.3M"), Some(dec!(2300000)));
    assert_eq!(parse_numeric_unit("85K"), Some(dec!(85000)));
    assert_eq!(parse_numeric_unit("1.5B"), Some(dec!(1500000000)));
    assert_eq!(parse_numeric_unit("--"), None);
    assert_eq!(parse_numeric_unit(""), None);
}
