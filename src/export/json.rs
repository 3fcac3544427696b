//! JSON export

use crate::engine::MatchResult;
use crate::error::{BgpeeprError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty JSON array of `{asn, organization, prefixes}` objects
pub fn to_json(results: &[MatchResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Write the JSON export to `path`, replacing any existing file
pub fn write_json(path: &Path, results: &[MatchResult]) -> Result<()> {
    let file = File::create(path).map_err(|e| BgpeeprError::export_write(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, results)
        .map_err(|e| BgpeeprError::export_write(path, e))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| BgpeeprError::export_write(path, e))?;

    log::info!("Wrote {} results to {:?}", results.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> Vec<MatchResult> {
        vec![MatchResult {
            asn: 13335,
            organization: "Cloudflare".to_string(),
            prefixes: vec!["1.1.1.0/24".to_string(), "1.0.0.0/24".to_string()],
        }]
    }

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let entry = &value.as_array().unwrap()[0];
        assert_eq!(entry["asn"], 13335);
        assert_eq!(entry["organization"], "Cloudflare");
        assert_eq!(entry["prefixes"][0], "1.1.1.0/24");
        assert_eq!(entry["prefixes"][1], "1.0.0.0/24");
    }

    #[test]
    fn test_empty_results_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale content that is longer than the new file").unwrap();

        write_json(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn test_write_json_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let result = write_json(&path, &sample());
        assert!(matches!(result, Err(BgpeeprError::ExportWriteError { .. })));
    }
}
