//! Database loader for bgpeepr-rs
//!
//! Turns a local or remote IPtoASN dataset into a lazy stream of records.
//!
//! # Module Organization
//!
//! - `record`: the `Record` type and its line parser
//! - `reader`: plain/gzip file reader yielding records, skipping malformed lines
//! - `source`: local vs. remote source selection and download

pub mod reader;
pub mod record;
pub mod source;

pub use reader::{LoadStats, RecordReader};
pub use record::Record;
pub use source::{DatabaseSource, PreparedSource};
