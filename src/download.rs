// Downloader: fetch one URL and persist the bytes under a local
// directory. Deliberately unhardened: no retry, no integrity check. A
// failure here is worth stopping the whole run for, so errors are typed
// and propagated instead of being swallowed.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a download failed.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to fetch {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fetches image URLs and writes them into a target directory,
/// overwriting files that already exist.
pub struct Downloader {
    client: Client,
    dir: PathBuf,
}

impl Downloader {
    /// Create a downloader rooted at `dir`, creating the directory if it
    /// is missing. Redirects are followed (reqwest's default policy);
    /// media URLs commonly bounce through a CDN.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create download dir {}", dir.display()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Downloader { client, dir })
    }

    /// Download `url` and save it as `name` inside the target directory.
    /// Returns the path the bytes were written to.
    pub fn fetch(&self, name: &str, url: &str) -> Result<PathBuf, DownloadError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| DownloadError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().map_err(|source| DownloadError::Http {
            url: url.to_string(),
            source,
        })?;
        let path = self.dir.join(name);
        fs::write(&path, &bytes).map_err(|source| DownloadError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
