//! CSV export
//!
//! One row per ASN. All prefixes of an ASN share a single field, joined by a
//! separator that never collides with the CSV delimiter.

use crate::engine::MatchResult;
use crate::error::{BgpeeprError, Result};
use std::io::Write;
use std::path::Path;

pub const CSV_HEADER: [&str; 3] = ["asn", "organization", "prefixes"];

/// Serialize results as CSV into any writer
pub fn write_csv_to<W: Write>(writer: W, results: &[MatchResult], separator: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for result in results {
        wtr.write_record([
            result.asn.to_string(),
            result.organization.clone(),
            result.prefixes.join(separator),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the CSV export to `path`, replacing any existing file
pub fn write_csv(path: &Path, results: &[MatchResult], separator: &str) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| BgpeeprError::export_write(path, e))?;
    write_csv_to(file, results, separator).map_err(|e| BgpeeprError::export_write(path, e))?;

    log::info!("Wrote {} rows to {:?}", results.len(), path);
    Ok(())
}

/// Split a `prefixes` field back into individual CIDR strings
pub fn split_prefixes<'a>(field: &'a str, separator: &str) -> Vec<&'a str> {
    field
        .split(separator)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MatchResult> {
        vec![
            MatchResult {
                asn: 15169,
                organization: "Google, LLC".to_string(),
                prefixes: vec!["8.8.8.0/24".to_string(), "8.8.4.0/24".to_string()],
            },
            MatchResult {
                asn: 396982,
                organization: "GOOGLE-CLOUD-PLATFORM".to_string(),
                prefixes: vec!["34.0.0.0/15".to_string()],
            },
        ]
    }

    #[test]
    fn test_csv_rows_reparse() {
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &sample(), " ").unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "15169");
        assert_eq!(&rows[0][1], "Google, LLC");
        assert_eq!(split_prefixes(&rows[0][2], " "), vec!["8.8.8.0/24", "8.8.4.0/24"]);
        assert_eq!(split_prefixes(&rows[1][2], " "), vec!["34.0.0.0/15"]);
    }

    #[test]
    fn test_csv_custom_separator() {
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &sample()[..1], ";").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("8.8.8.0/24;8.8.4.0/24"));
    }

    #[test]
    fn test_ipv6_prefixes_resplit_with_accepted_separators() {
        let prefixes = vec!["1.1.1.0/24".to_string(), "2606:4700::/32".to_string()];
        let results = vec![MatchResult {
            asn: 13335,
            organization: "CLOUDFLARENET".to_string(),
            prefixes: prefixes.clone(),
        }];

        for sep in [" ", ";", " | ", "\t"] {
            let mut buf = Vec::new();
            write_csv_to(&mut buf, &results, sep).unwrap();
            let mut reader = csv::Reader::from_reader(buf.as_slice());
            let row = reader.records().next().unwrap().unwrap();
            assert_eq!(split_prefixes(&row[2], sep), prefixes, "separator {:?}", sep);
        }
    }

    #[test]
    fn test_csv_and_json_carry_same_content() {
        let results = sample();

        let mut buf = Vec::new();
        write_csv_to(&mut buf, &results, " ").unwrap();
        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let from_csv: Vec<MatchResult> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                MatchResult {
                    asn: r[0].parse().unwrap(),
                    organization: r[1].to_string(),
                    prefixes: split_prefixes(&r[2], " ").into_iter().map(String::from).collect(),
                }
            })
            .collect();

        let json: serde_json::Value =
            serde_json::from_str(&crate::export::to_json(&results).unwrap()).unwrap();
        let from_json: Vec<MatchResult> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| MatchResult {
                asn: v["asn"].as_u64().unwrap() as u32,
                organization: v["organization"].as_str().unwrap().to_string(),
                prefixes: v["prefixes"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|p| p.as_str().unwrap().to_string())
                    .collect(),
            })
            .collect();

        assert_eq!(from_csv, from_json);
        assert_eq!(from_csv, results);
    }

    #[test]
    fn test_write_csv_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.csv");
        let result = write_csv(&path, &sample(), " ");
        assert!(matches!(result, Err(BgpeeprError::ExportWriteError { .. })));
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&path, &sample(), " ").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("asn,organization,prefixes\n"));
        assert!(text.contains("\"Google, LLC\""));
    }
}
