//! Match & aggregate engine
//!
//! - `cidr`: inclusive address range to minimal CIDR list
//! - `matcher`: case-insensitive substring match on organization names
//! - `aggregate`: per-ASN folding of matching records

pub mod aggregate;
pub mod cidr;
pub mod matcher;

pub use aggregate::{Aggregator, MatchResult, match_records};
pub use cidr::range_to_cidrs;
pub use matcher::OrgMatcher;
