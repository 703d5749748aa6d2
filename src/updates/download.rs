//! Artifact download into a scoped temporary file.

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use super::cancel::CancellationToken;
use crate::error::{Result, UpdaterError};

/// File suffix the host's install command expects.
pub const ARTIFACT_SUFFIX: &str = ".vsix";

const CHUNK_SIZE: usize = 64 * 1024;

/// A downloaded artifact. The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct DownloadedArtifact {
    file: NamedTempFile,
    sha256: String,
    size: u64,
}

impl DownloadedArtifact {
    /// Path of the temporary file holding the artifact.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Hex-encoded SHA-256 digest of the artifact.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Size of the artifact in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Downloads artifacts over HTTP.
pub struct ArtifactDownloader {
    client: Client,
    timeout: Duration,
}

impl ArtifactDownloader {
    /// Create a downloader whose whole transfer is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("prerelease-updater/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UpdaterError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Get the transfer timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download `url` into a fresh temporary `.vsix` file.
    ///
    /// Cancellation is checked between chunks. A body shorter than the
    /// advertised `Content-Length` or an empty body is a [`UpdaterError::Download`].
    pub fn download(&self, url: &str, cancel: &CancellationToken) -> Result<DownloadedArtifact> {
        cancel.check("downloading")?;

        let fail = |message: String| UpdaterError::Download {
            url: url.to_string(),
            message,
        };

        tracing::debug!(%url, "downloading artifact");

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let expected = response.content_length();

        let mut file = tempfile::Builder::new()
            .prefix("prerelease-")
            .suffix(ARTIFACT_SUFFIX)
            .tempfile()
            .map_err(|e| fail(format!("cannot create temp file: {}", e)))?;

        let mut hasher = Sha256::new();
        let mut size: u64 = 0;
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            cancel.check("downloading")?;

            let read = response
                .read(&mut buf)
                .map_err(|e| fail(format!("read failed after {} bytes: {}", size, e)))?;
            if read == 0 {
                break;
            }

            file.write_all(&buf[..read])
                .map_err(|e| fail(format!("write failed: {}", e)))?;
            hasher.update(&buf[..read]);
            size += read as u64;
        }

        file.flush().map_err(|e| fail(format!("flush failed: {}", e)))?;

        if size == 0 {
            return Err(fail("empty response body".to_string()));
        }

        if let Some(expected) = expected {
            if size != expected {
                return Err(fail(format!(
                    "incomplete transfer: got {} of {} bytes",
                    size, expected
                )));
            }
        }

        let sha256 = hex::encode(hasher.finalize());
        tracing::debug!(path = %file.path().display(), size, %sha256, "artifact downloaded");

        Ok(DownloadedArtifact { file, sha256, size })
    }
}
