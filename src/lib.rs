//! bgpeepr-rs: look up ASNs and their announced prefixes by organization name
//!
//! Reads the IPtoASN dataset (downloaded or local), matches organizations by
//! case-insensitive substring and groups the matching ranges per ASN as CIDR
//! prefixes, ready for console, JSON or CSV output.

pub mod cli;
pub mod config;
pub mod database;
pub mod download;
pub mod engine;
pub mod error;
pub mod export;
pub mod utils;

// Re-export common types
pub use database::{DatabaseSource, Record, RecordReader};
pub use engine::{Aggregator, MatchResult, match_records, range_to_cidrs};
pub use error::{BgpeeprError, Result};
