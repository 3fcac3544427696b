//! Result exporter
//!
//! Console output is always produced; JSON and CSV files are optional sinks
//! that always carry the complete prefix lists.

pub mod console;
pub mod delimited;
pub mod json;

pub use console::format_console;
pub use delimited::{split_prefixes, write_csv, write_csv_to};
pub use json::{to_json, write_json};

use crate::engine::MatchResult;
use crate::error::{BgpeeprError, Result};
use std::path::PathBuf;

/// Requested file sinks
#[derive(Debug, Clone, Default)]
pub struct ExportTargets {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

/// What happened to each requested sink
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<BgpeeprError>,
}

impl ExportReport {
    /// First failure as the error; later ones are logged
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        let mut failures = self.failures.into_iter();
        match failures.next() {
            Some(first) => {
                for other in failures {
                    log::error!("{}", other);
                }
                Err(first)
            }
            None => Ok(self.written),
        }
    }
}

impl ExportTargets {
    pub fn is_empty(&self) -> bool {
        self.json.is_none() && self.csv.is_none()
    }

    /// Write every requested file
    ///
    /// A failing sink does not stop the others.
    pub fn write_all(&self, results: &[MatchResult], separator: &str) -> ExportReport {
        let mut report = ExportReport::default();

        if let Some(path) = &self.json {
            match write_json(path, results) {
                Ok(()) => report.written.push(path.clone()),
                Err(e) => report.failures.push(e),
            }
        }

        if let Some(path) = &self.csv {
            match write_csv(path, results, separator) {
                Ok(()) => report.written.push(path.clone()),
                Err(e) => report.failures.push(e),
            }
        }

        report
    }
}
