//! Ports Layer - Trait definitions at the layout seam
//!
//! Listing pages change their rendering over time. Layouts are versioned
//! behind these traits so a new page version is a new implementation.

pub mod layout;

pub use layout::{PercentWindowStrategy, RowIdentity, RowLayout};
