//! Error types for updater operations.
//!
//! This module defines [`UpdaterError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The three update failures ([`UpdaterError::RemoteFetch`],
//!   [`UpdaterError::Download`], [`UpdaterError::Install`]) are caught at the
//!   orchestrator boundary and turned into a skipped run
//! - Host and configuration errors surface to the CLI with actionable messages
//! - Use `anyhow::Error` (via `UpdaterError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for updater operations.
#[derive(Debug, Error)]
pub enum UpdaterError {
    /// The release index could not be fetched or parsed.
    #[error("Failed to fetch release index from {url}: {message}")]
    RemoteFetch { url: String, message: String },

    /// The artifact could not be retrieved completely.
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// The host rejected or failed the install.
    #[error("Failed to install {path}: {message}")]
    Install { path: PathBuf, message: String },

    /// The run was cancelled before it finished.
    #[error("Operation cancelled during {stage}")]
    Cancelled { stage: String },

    /// No handler is registered under the command name.
    #[error("Unknown host command: {name}")]
    UnknownCommand { name: String },

    /// A registered host command ran but failed.
    #[error("Host command '{name}' failed: {message}")]
    HostCommandFailed { name: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The persisted state file could not be read or written.
    #[error("State error at {path}: {message}")]
    StateError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UpdaterError {
    /// Short kind label used in logs and run outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteFetch { .. } => "remote_fetch",
            Self::Download { .. } => "download",
            Self::Install { .. } => "install",
            Self::Cancelled { .. } => "cancelled",
            Self::UnknownCommand { .. } => "unknown_command",
            Self::HostCommandFailed { .. } => "host_command",
            Self::ConfigNotFound { .. }
            | Self::ConfigParseError { .. }
            | Self::ConfigValidationError { .. } => "config",
            Self::StateError { .. } => "state",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }
}

/// Result type alias for updater operations.
pub type Result<T> = std::result::Result<T, UpdaterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_fetch_displays_url_and_message() {
        let err = UpdaterError::RemoteFetch {
            url: "https://example.com/releases".into(),
            message: "HTTP 503".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/releases"));
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn download_displays_url() {
        let err = UpdaterError::Download {
            url: "https://example.com/a.vsix".into(),
            message: "connection reset".into(),
        };
        assert!(err.to_string().contains("a.vsix"));
    }

    #[test]
    fn install_displays_path() {
        let err = UpdaterError::Install {
            path: PathBuf::from("/tmp/ext.vsix"),
            message: "exit code 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/ext.vsix"));
        assert!(msg.contains("exit code 1"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = UpdaterError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn kinds_group_config_errors() {
        let parse = UpdaterError::ConfigParseError {
            path: PathBuf::from("c.yml"),
            message: "bad".into(),
        };
        let invalid = UpdaterError::ConfigValidationError {
            message: "bad".into(),
        };
        assert_eq!(parse.kind(), "config");
        assert_eq!(invalid.kind(), "config");
    }

    #[test]
    fn update_failures_have_distinct_kinds() {
        let fetch = UpdaterError::RemoteFetch {
            url: String::new(),
            message: String::new(),
        };
        let download = UpdaterError::Download {
            url: String::new(),
            message: String::new(),
        };
        let install = UpdaterError::Install {
            path: PathBuf::new(),
            message: String::new(),
        };
        assert_eq!(fetch.kind(), "remote_fetch");
        assert_eq!(download.kind(), "download");
        assert_eq!(install.kind(), "install");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: UpdaterError = io_err.into();
        assert!(matches!(err, UpdaterError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: UpdaterError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, UpdaterError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
