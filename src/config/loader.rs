//! Configuration file discovery and loading.
//!
//! This module finds the configuration files, merges them in priority
//! order and applies `PRERELEASE_UPDATER_*` environment overrides.

use crate::config::merger::merge_configs;
use crate::config::schema::UpdaterConfig;
use crate::error::{Result, UpdaterError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "PRERELEASE_UPDATER_";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.prerelease-updater/config.yml`)
/// 2. Explicit config (`--config <path>`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.prerelease-updater/config.yml
    pub user_global: Option<PathBuf>,

    /// File passed with `--config`; must exist when set.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files, honouring an explicit override.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Default location of the user global config.
    pub fn user_global_path() -> Option<PathBuf> {
        Some(
            dirs::home_dir()?
                .join(".prerelease-updater")
                .join("config.yml"),
        )
    }

    fn find_user_global() -> Option<PathBuf> {
        Self::user_global_path().filter(|path| path.exists())
    }

    /// Returns all config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.explicit.iter()).collect()
    }
}

/// Load a config file as raw YAML Value (for merging).
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            UpdaterError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UpdaterError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| UpdaterError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML content into UpdaterConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<UpdaterConfig> {
    if content.trim().is_empty() {
        return Ok(UpdaterConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| UpdaterError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the files named by `paths`, then apply `env` overrides.
pub fn load_config_from(
    paths: &ConfigPaths,
    env: &HashMap<String, String>,
) -> Result<UpdaterConfig> {
    let mut values = Vec::new();
    for path in paths.all() {
        let value = load_config_value(path)?;
        // Empty files parse to null and contribute nothing.
        if !value.is_null() {
            values.push(value);
        }
    }

    let merged = merge_configs(&values);
    let source = paths
        .explicit
        .clone()
        .or_else(|| paths.user_global.clone())
        .unwrap_or_else(|| PathBuf::from("<defaults>"));

    let mut config: UpdaterConfig =
        serde_yaml::from_value(merged).map_err(|e| UpdaterError::ConfigParseError {
            path: source,
            message: format!("Failed to parse merged config: {}", e),
        })?;

    apply_env_overrides(&mut config, env)?;
    Ok(config)
}

/// Load configuration using the process environment.
pub fn load_config(explicit: Option<&Path>) -> Result<UpdaterConfig> {
    let env: HashMap<String, String> = std::env::vars()
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .collect();
    load_config_from(&ConfigPaths::discover(explicit), &env)
}

/// Apply `PRERELEASE_UPDATER_*` overrides to a loaded config.
pub fn apply_env_overrides(
    config: &mut UpdaterConfig,
    env: &HashMap<String, String>,
) -> Result<()> {
    let get = |name: &str| env.get(&format!("{}{}", ENV_PREFIX, name));

    if let Some(v) = get("RELEASE_INDEX_URL") {
        config.release_index_url = v.clone();
    }
    if let Some(v) = get("STATE_DIR") {
        config.state_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = get("EDITOR_CLI") {
        config.host.editor_cli = v.clone();
    }
    if let Some(v) = get("SERVER_URL") {
        config.enterprise.server_url = Some(v.clone());
    }
    if let Some(v) = get("EXTENSION_VERSION") {
        config.channel.extension_version = Some(v.clone());
    }
    if let Some(v) = get("HOST_VERSION") {
        config.channel.host_version = Some(v.clone());
    }
    if let Some(v) = get("INSIDERS") {
        config.channel.insiders = parse_bool("INSIDERS", v)?;
    }
    if let Some(v) = get("ALPHA_CAPABILITY") {
        config.channel.alpha_capability = parse_bool("ALPHA_CAPABILITY", v)?;
    }
    if let Some(v) = get("BETA_CHANNEL") {
        config.channel.beta_channel_enabled = parse_bool("BETA_CHANNEL", v)?;
    }
    if let Some(v) = get("FETCH_TIMEOUT_SECS") {
        config.network.fetch_timeout_secs = parse_secs("FETCH_TIMEOUT_SECS", v)?;
    }
    if let Some(v) = get("DOWNLOAD_TIMEOUT_SECS") {
        config.network.download_timeout_secs = parse_secs("DOWNLOAD_TIMEOUT_SECS", v)?;
    }

    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(UpdaterError::ConfigValidationError {
            message: format!("{}{} must be a boolean, got '{}'", ENV_PREFIX, name, value),
        }),
    }
}

fn parse_secs(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| UpdaterError::ConfigValidationError {
            message: format!(
                "{}{} must be a number of seconds, got '{}'",
                ENV_PREFIX, name, value
            ),
        })
}
