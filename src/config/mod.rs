//! Configuration module for bgpeepr-rs
//!
//! Handles loading configuration from an optional YAML file and environment variables.

use crate::error::{BgpeeprError, Result};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_IPV4_URL: &str =
    "https://github.com/pl-strflt/iptoasn/raw/main/data/ip2asn-v4.tsv.gz";
pub const DEFAULT_IPV6_URL: &str =
    "https://github.com/pl-strflt/iptoasn/raw/main/data/ip2asn-v6.tsv.gz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Remote database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// IPv4 dataset URL
    #[serde(default = "default_ipv4_url")]
    pub ipv4_url: String,

    /// IPv6 dataset URL
    #[serde(default = "default_ipv6_url")]
    pub ipv6_url: String,

    /// HTTP timeout for the whole fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub enable_colors: bool,

    /// Joins prefixes inside the single CSV prefix field
    #[serde(default = "default_prefix_separator")]
    pub prefix_separator: String,
}

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Verbose logging
    #[serde(default)]
    pub verbose: bool,
}

fn default_ipv4_url() -> String {
    DEFAULT_IPV4_URL.to_string()
}

fn default_ipv6_url() -> String {
    DEFAULT_IPV6_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_prefix_separator() -> String {
    " ".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            ipv4_url: default_ipv4_url(),
            ipv6_url: default_ipv6_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enable_colors: true,
            prefix_separator: default_prefix_separator(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// A missing config file is not an error; nothing is written back.
    pub fn load() -> Result<Self> {
        let config_file = path::config_file()?;

        let mut config = if config_file.exists() {
            Self::from_file(&config_file)?
        } else {
            log::debug!("No config file at {:?}, using defaults", config_file);
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BgpeeprError::config(format!("Failed to read config file: {}", e)))?;

        let config = serde_yaml::from_str(&content)
            .map_err(|e| BgpeeprError::YamlError(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from `lookup` (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("BGPEEPR_V4_URL") {
            self.source.ipv4_url = val;
        }
        if let Some(val) = lookup("BGPEEPR_V6_URL") {
            self.source.ipv6_url = val;
        }
        if let Some(val) = lookup("BGPEEPR_TIMEOUT") {
            match val.parse() {
                Ok(secs) => self.source.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid BGPEEPR_TIMEOUT value: {}", val),
            }
        }
    }

    /// Reject settings the loader or exporter cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.source.ipv4_url.trim().is_empty() || self.source.ipv6_url.trim().is_empty() {
            return Err(BgpeeprError::config("database URLs must not be empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(BgpeeprError::config("timeout_secs must be greater than zero"));
        }

        let sep = &self.output.prefix_separator;
        if sep.is_empty() || sep.chars().any(is_reserved_separator_char) {
            return Err(BgpeeprError::config(format!(
                "invalid prefix_separator {:?}: must be non-empty and free of commas, quotes, line breaks and CIDR characters",
                sep
            )));
        }

        Ok(())
    }
}

/// Characters that would make the joined CSV prefix field ambiguous
fn is_reserved_separator_char(c: char) -> bool {
    c.is_ascii_hexdigit() || matches!(c, '.' | ':' | '/' | ',' | '"' | '\n' | '\r')
}
