//! Database downloader module
//!
//! Fetches the remote IPtoASN datasets into temporary files.

use crate::config::SourceConfig;
use crate::error::{BgpeeprError, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Database downloader
///
/// One attempt per URL; every failure is reported as `SourceUnavailable`.
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Create a new downloader
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!("bgpeepr-rs/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BgpeeprError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Download `url` into `dest`
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to download from
    /// * `dest` - The destination file path
    /// * `show_progress` - Whether to display a progress bar
    pub async fn download_file(&self, url: &str, dest: &Path, show_progress: bool) -> Result<()> {
        log::info!("Downloading from: {}", url);
        log::info!("Saving to: {:?}", dest);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BgpeeprError::source_unavailable(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(BgpeeprError::source_unavailable(format!(
                "HTTP error: {} - {}",
                response.status(),
                url
            )));
        }

        let pb = match response.content_length() {
            Some(total) if show_progress => Some(progress_bar(total, url)),
            _ => None,
        };

        let file = File::create(dest).map_err(|e| {
            BgpeeprError::source_unavailable(format!("cannot create {}: {}", dest.display(), e))
        })?;
        let mut writer = BufWriter::new(file);

        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                BgpeeprError::source_unavailable(format!("failed to read body of {}: {}", url, e))
            })?;

            writer.write_all(&chunk).map_err(|e| {
                BgpeeprError::source_unavailable(format!("cannot write {}: {}", dest.display(), e))
            })?;

            downloaded += chunk.len() as u64;
            if let Some(ref pb) = pb {
                pb.set_position(downloaded);
            }
        }

        writer.flush().map_err(|e| {
            BgpeeprError::source_unavailable(format!("cannot write {}: {}", dest.display(), e))
        })?;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        log::info!("Downloaded {} bytes to {:?}", downloaded, dest);
        Ok(())
    }

    /// Download into a process-private temp file that is removed on drop
    pub async fn download_temp(&self, url: &str, show_progress: bool) -> Result<TempDownload> {
        let name = url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("ip2asn.tsv");
        let temp = TempDownload {
            path: crate::utils::path::temp_download_file(name),
        };

        self.download_file(url, &temp.path, show_progress).await?;
        Ok(temp)
    }
}

fn progress_bar(total: u64, url: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(format!(
        "Downloading {}",
        url.split('/').next_back().unwrap_or("database")
    ));
    pb
}

/// A downloaded file that is deleted when dropped
#[derive(Debug)]
pub struct TempDownload {
    path: PathBuf,
}

impl TempDownload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDownload {
    fn drop(&mut self) {
        if self.path.exists()
            && let Err(e) = std::fs::remove_file(&self.path)
        {
            log::warn!("Failed to delete temp file {:?}: {}", self.path, e);
        }
    }
}
