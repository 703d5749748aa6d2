//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::updates::oracle::DEFAULT_RELEASE_INDEX_URL;

/// Extension ids that conflict with the enterprise build.
pub const DEFAULT_CONFLICTING_EXTENSIONS: [&str; 2] =
    ["tabnine.tabnine-vscode", "tabnine.tabnine-vscode-enterprise"];

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Release index queried for pre-release artifacts.
    #[serde(default = "default_release_index_url")]
    pub release_index_url: String,

    /// Directory holding `state.yml` (defaults to `~/.prerelease-updater`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,

    /// Pre-release channel settings.
    pub channel: ChannelConfig,

    /// Editor host integration.
    pub host: HostConfig,

    /// Enterprise server settings.
    pub enterprise: EnterpriseConfig,

    /// Network timeouts.
    pub network: NetworkConfig,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            release_index_url: default_release_index_url(),
            state_dir: None,
            channel: ChannelConfig::default(),
            host: HostConfig::default(),
            enterprise: EnterpriseConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

fn default_release_index_url() -> String {
    DEFAULT_RELEASE_INDEX_URL.to_string()
}

/// What the running host and extension report about the pre-release channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Version of the running extension, used when nothing was installed yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_version: Option<String>,

    /// Version of the host editor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_version: Option<String>,

    /// The host is an early-access (insiders) build.
    pub insiders: bool,

    /// The alpha capability is enabled for this user.
    pub alpha_capability: bool,

    /// The user opted into the beta channel setting.
    pub beta_channel_enabled: bool,
}

/// Editor host integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Editor command-line binary used to install and uninstall extensions.
    #[serde(default = "default_editor_cli")]
    pub editor_cli: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            editor_cli: default_editor_cli(),
        }
    }
}

fn default_editor_cli() -> String {
    "code".to_string()
}

/// Enterprise server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnterpriseConfig {
    /// Self-hosted server URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Server URL left behind by the legacy updater extension.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updater_server_url: Option<String>,

    /// Route completion-engine traffic through the configured proxy.
    pub use_proxy_support: bool,

    /// Installed extensions that must be removed before activation.
    #[serde(default = "default_conflicting_extensions")]
    pub conflicting_extensions: Vec<String>,
}

impl Default for EnterpriseConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            updater_server_url: None,
            use_proxy_support: false,
            conflicting_extensions: default_conflicting_extensions(),
        }
    }
}

fn default_conflicting_extensions() -> Vec<String> {
    DEFAULT_CONFLICTING_EXTENSIONS
        .iter()
        .map(|id| id.to_string())
        .collect()
}

/// Network timeouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Timeout for the release index and health probe, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Timeout for the artifact download, in seconds.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl NetworkConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    300
}
