//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use prerelease_updater::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "host:\n  editor_cli: codium\n").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.host.editor_cli, "codium");
//! ```
//!
//! # Configuration File Locations
//!
//! Configuration is merged in this order:
//! 1. User global config (`~/.prerelease-updater/config.yml`)
//! 2. Explicit config (`--config <path>`)
//! 3. `PRERELEASE_UPDATER_*` environment variables

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    apply_env_overrides, load_config, load_config_from, load_config_value, parse_config,
    ConfigPaths, ENV_PREFIX,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{
    ChannelConfig, EnterpriseConfig, HostConfig, NetworkConfig, UpdaterConfig,
    DEFAULT_CONFLICTING_EXTENSIONS,
};
pub use validator::{validate, validate_config, ValidationError};
