//! Snapshot Normalizer - DEX market data normalization library
//!
//! Turns scraped listing rows and pair-detail API responses into canonical,
//! strongly typed market snapshots. All normalization is pure and fails soft
//! per field.
//!
//! # Modules
//!
//! - `domain`: Snapshot records, chains and address canonicalization, numeric parsing
//! - `ports`: Trait abstractions for versioned listing layouts
//! - `adapters`: Listing and pair-detail normalizers, CLI
//! - `config`: Configuration loading and validation
//! - `application`: Batch normalization with aggregate reporting

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
