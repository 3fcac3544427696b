//! Error types for bgpeepr-rs
//!
//! This module defines custom error types using thiserror for better error handling.

use std::path::Path;
use thiserror::Error;

/// Main error type for bgpeepr-rs
#[derive(Error, Debug)]
pub enum BgpeeprError {
    /// Database could not be read or fetched
    #[error("IPtoASN database unavailable: {0}")]
    SourceUnavailable(String),

    /// A single database line could not be used (always recovered by the loader)
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// An export destination could not be written
    #[error("Failed to write {path}: {reason}")]
    ExportWriteError { path: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(String),
}

/// Result type alias for bgpeepr-rs
pub type Result<T> = std::result::Result<T, BgpeeprError>;

impl BgpeeprError {
    /// Create a source unavailable error
    pub fn source_unavailable<S: Into<String>>(msg: S) -> Self {
        BgpeeprError::SourceUnavailable(msg.into())
    }

    /// Create a malformed record error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        BgpeeprError::MalformedRecord(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BgpeeprError::ConfigError(msg.into())
    }

    /// Create an export write error for `path`
    pub fn export_write<E: std::fmt::Display>(path: &Path, err: E) -> Self {
        BgpeeprError::ExportWriteError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Whether the loader may drop the offending line and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BgpeeprError::MalformedRecord(_))
    }
}
