//! Lazy line reader over a plain or gzip-compressed IPtoASN file

use crate::error::{BgpeeprError, Result};
use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::record::Record;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Counters collected while reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub lines: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Open a database file, transparently decompressing gzip content
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| {
        BgpeeprError::source_unavailable(format!("failed to open {}: {}", path.display(), e))
    })?;
    let mut reader = BufReader::new(file);

    let head = reader.fill_buf().map_err(|e| {
        BgpeeprError::source_unavailable(format!("failed to read {}: {}", path.display(), e))
    })?;

    if head.starts_with(&GZIP_MAGIC) {
        log::debug!("{} is gzip compressed", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Iterator of parsed records
///
/// Malformed lines are skipped and counted. A read failure ends the stream
/// with `SourceUnavailable`.
pub struct RecordReader<R> {
    inner: R,
    buf: Vec<u8>,
    stats: LoadStats,
    failed: bool,
}

impl RecordReader<Box<dyn BufRead>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(open(path)?))
    }
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            stats: LoadStats::default(),
            failed: false,
        }
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl<R: Read> RecordReader<BufReader<R>> {
    pub fn from_reader(inner: R) -> Self {
        Self::new(BufReader::new(inner))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(BgpeeprError::source_unavailable(format!(
                        "read failed after line {}: {}",
                        self.stats.lines, e
                    ))));
                }
            }
            self.stats.lines += 1;

            // Only line endings are stripped; a trailing tab still delimits
            // an empty description field.
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end_matches(['\r', '\n']);
            let content = line.trim_start();
            if content.trim_end().is_empty() || content.starts_with('#') {
                continue;
            }

            match content.parse::<Record>() {
                Ok(record) => {
                    self.stats.records += 1;
                    return Some(Ok(record));
                }
                Err(e) if e.is_recoverable() => {
                    self.stats.skipped += 1;
                    log::debug!("Skipping line {}: {}", self.stats.lines, e);
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "\
# comment line
1.0.0.0\t1.0.0.255\t13335\tUS\tCLOUDFLARENET

1.0.4.0\t1.0.7.255\t38803\tAU\tWPL-AS-AP Wirefreebroadband Pty Ltd
garbage line
1.0.8.0\t1.0.15.255\tnope\tCN\tBad ASN
";

    #[test]
    fn test_reader_skips_comments_and_malformed() {
        let mut reader = RecordReader::from_reader(Cursor::new(SAMPLE));
        let records: Vec<Record> = reader.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].asn, 13335);
        assert_eq!(records[1].asn, 38803);

        let stats = reader.stats();
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn test_reader_keeps_row_with_empty_description() {
        let input = "1.0.0.0\t1.0.0.255\t13335\tUS\t\n1.0.4.0\t1.0.7.255\t38803\tAU\tWPL\r\n";
        let mut reader = RecordReader::from_reader(Cursor::new(input));
        let records: Vec<Record> = reader.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].asn, 13335);
        assert_eq!(records[0].organization, "");
        assert_eq!(records[1].organization, "WPL");
        assert_eq!(
            reader.stats(),
            LoadStats {
                lines: 2,
                records: 2,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_reader_handles_invalid_utf8() {
        let mut data = b"1.0.0.0,1.0.0.255,13335,Cloud".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(b"flare\n");

        let records: Vec<Record> = RecordReader::from_reader(Cursor::new(data))
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].organization.starts_with("Cloud"));
    }

    #[test]
    fn test_open_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip2asn.tsv");
        std::fs::write(&path, SAMPLE).unwrap();

        let count = RecordReader::from_path(&path).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_open_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip2asn.tsv.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let records: Vec<Record> = RecordReader::from_path(&path)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].organization, "CLOUDFLARENET");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open(&dir.path().join("missing.tsv"));
        assert!(matches!(result, Err(BgpeeprError::SourceUnavailable(_))));
    }

    #[test]
    fn test_corrupt_gzip_ends_with_source_unavailable() {
        let mut data = GZIP_MAGIC.to_vec();
        data.extend_from_slice(b"definitely not deflate data");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.gz");
        std::fs::write(&path, data).unwrap();

        let results: Vec<Result<Record>> = RecordReader::from_path(&path).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(BgpeeprError::SourceUnavailable(_))));
    }
}
