//! Where the database comes from: a local file or the remote datasets

use crate::config::SourceConfig;
use crate::download::{Downloader, TempDownload};
use crate::error::{BgpeeprError, Result};
use crate::utils::path::expand_tilde;
use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use super::reader::RecordReader;

/// A single database input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    Local(PathBuf),
    Remote { url: String, label: &'static str },
}

impl DatabaseSource {
    /// Decide which inputs to read
    ///
    /// A local file replaces the remote datasets entirely. Remotely the IPv6
    /// dataset is published separately, so it is only fetched when asked for.
    pub fn plan(local: Option<&str>, include_ipv6: bool, config: &SourceConfig) -> Vec<Self> {
        if let Some(local) = local {
            return vec![DatabaseSource::Local(expand_tilde(local))];
        }

        let mut sources = vec![DatabaseSource::Remote {
            url: config.ipv4_url.clone(),
            label: "IPv4",
        }];
        if include_ipv6 {
            sources.push(DatabaseSource::Remote {
                url: config.ipv6_url.clone(),
                label: "IPv6",
            });
        }
        sources
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DatabaseSource::Remote { .. })
    }

    /// Make the source readable from disk, downloading it when remote
    pub async fn prepare(
        &self,
        downloader: Option<&Downloader>,
        show_progress: bool,
    ) -> Result<PreparedSource> {
        match self {
            DatabaseSource::Local(path) => {
                if !path.is_file() {
                    return Err(BgpeeprError::source_unavailable(format!(
                        "local file '{}' does not exist",
                        path.display()
                    )));
                }
                Ok(PreparedSource::Local(path.clone()))
            }
            DatabaseSource::Remote { url, label } => {
                let downloader = downloader.ok_or_else(|| {
                    BgpeeprError::source_unavailable(format!("no downloader available for {}", url))
                })?;
                eprintln!("Downloading IPtoASN {} data...", label);
                let temp = downloader.download_temp(url, show_progress).await?;
                Ok(PreparedSource::Downloaded(temp))
            }
        }
    }
}

impl fmt::Display for DatabaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseSource::Local(path) => write!(f, "{}", path.display()),
            DatabaseSource::Remote { url, label } => write!(f, "{} ({})", url, label),
        }
    }
}

/// A source that is available on disk
#[derive(Debug)]
pub enum PreparedSource {
    Local(PathBuf),
    Downloaded(TempDownload),
}

impl PreparedSource {
    pub fn path(&self) -> &Path {
        match self {
            PreparedSource::Local(path) => path,
            PreparedSource::Downloaded(temp) => temp.path(),
        }
    }

    pub fn records(&self) -> Result<RecordReader<Box<dyn BufRead>>> {
        RecordReader::from_path(self.path())
    }
}
