//! Release index lookup.
//!
//! Fetches the remote release index and picks the newest pre-release
//! artifact from it.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cancel::CancellationToken;
use crate::error::{Result, UpdaterError};

/// Default remote release index.
pub const DEFAULT_RELEASE_INDEX_URL: &str =
    "https://api.github.com/repos/codota/tabnine-vscode/releases";

/// One asset attached to a release record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// Direct download URL of the packaged extension.
    pub browser_download_url: String,
}

/// One record of the remote release index.
///
/// Unknown fields are ignored so the full GitHub release payload parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Ordinal identifier assigned by the index.
    pub id: u64,
    /// Whether the release is flagged as a pre-release.
    #[serde(default)]
    pub prerelease: bool,
    /// Attached assets, first one is the installable artifact.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// The artifact chosen from the release index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArtifact {
    /// Ordinal identifier of the release the artifact belongs to.
    pub id: u64,
    /// Whether the release is flagged as a pre-release.
    pub prerelease: bool,
    /// Download URL of the artifact.
    pub download_url: String,
}

/// Pick the newest pre-release artifact from a release index.
///
/// "Newest" is the highest ordinal `id`. That only tracks recency while the
/// index assigns ids in publication order; a re-published old release would
/// win. Returns `None` when there is no pre-release entry or the chosen entry
/// has no assets.
pub fn select_latest_prerelease(records: &[ReleaseRecord]) -> Option<ReleaseArtifact> {
    let latest = records
        .iter()
        .filter(|r| r.prerelease)
        .max_by_key(|r| r.id)?;

    let asset = latest.assets.first()?;

    Some(ReleaseArtifact {
        id: latest.id,
        prerelease: latest.prerelease,
        download_url: asset.browser_download_url.clone(),
    })
}

/// Fetches the release index over HTTP.
pub struct ReleaseOracle {
    client: Client,
    index_url: String,
    timeout: Duration,
}

impl ReleaseOracle {
    /// Create an oracle for the given index URL with a request timeout.
    pub fn new(index_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("prerelease-updater/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UpdaterError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            index_url: index_url.into(),
            timeout,
        })
    }

    /// Get the index URL.
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and parse the full release index.
    pub fn fetch_index(&self, cancel: &CancellationToken) -> Result<Vec<ReleaseRecord>> {
        cancel.check("checking")?;

        tracing::debug!(url = %self.index_url, "fetching release index");

        let response = self
            .client
            .get(&self.index_url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| self.fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.fetch_error(format!("HTTP {}", response.status())));
        }

        let records: Vec<ReleaseRecord> = response
            .json()
            .map_err(|e| self.fetch_error(format!("invalid release index: {}", e)))?;

        cancel.check("checking")?;

        tracing::debug!(count = records.len(), "release index fetched");
        Ok(records)
    }

    /// Fetch the index and select the newest pre-release artifact.
    pub fn fetch_latest_prerelease_artifact(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<ReleaseArtifact>> {
        let records = self.fetch_index(cancel)?;
        Ok(select_latest_prerelease(&records))
    }

    fn fetch_error(&self, message: String) -> UpdaterError {
        UpdaterError::RemoteFetch {
            url: self.index_url.clone(),
            message,
        }
    }
}
