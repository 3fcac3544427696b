//! Path utilities for configuration files
//!
//! Handles XDG directory specifications and path resolution.

use crate::error::{BgpeeprError, Result};
use std::env;
use std::path::PathBuf;

/// Get the bgpeepr configuration directory
///
/// Priority:
/// 1. BGPEEPR_CONFIG_HOME environment variable
/// 2. BGPEEPR_HOME environment variable
/// 3. XDG_CONFIG_HOME/bgpeepr-rs
/// 4. ~/.config/bgpeepr-rs (fallback)
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("BGPEEPR_CONFIG_HOME") {
        return Ok(expand_tilde(&path));
    }

    if let Ok(path) = env::var("BGPEEPR_HOME") {
        return Ok(expand_tilde(&path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("bgpeepr-rs"));
    }

    Err(BgpeeprError::config("unable to determine config directory"))
}

/// Get the path to the config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Temp file path for a download, unique to this process
pub fn temp_download_file(name: &str) -> PathBuf {
    env::temp_dir().join(format!("bgpeepr-{}-{}", std::process::id(), name))
}

/// Expand tilde (~) in path
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_name() {
        let file = config_file();
        assert!(file.is_ok());
        assert!(file.unwrap().ends_with("config.yaml"));
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test");
        assert!(!path.to_string_lossy().starts_with("~"));
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/tmp/ip2asn.tsv"), PathBuf::from("/tmp/ip2asn.tsv"));
        assert_eq!(expand_tilde("data.tsv"), PathBuf::from("data.tsv"));
    }

    #[test]
    fn test_temp_download_file_is_per_process() {
        let path = temp_download_file("ip2asn-v4.tsv.gz");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.contains(&std::process::id().to_string()));
        assert!(name.ends_with("ip2asn-v4.tsv.gz"));
    }
}
