//! Configuration validation rules.
//!
//! - Every URL must use http or https
//! - Network timeouts must be non-zero
//! - The editor CLI must be named

use crate::config::schema::UpdaterConfig;
use crate::error::{Result, UpdaterError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Dotted path of the offending field
    pub field: String,
}

impl ValidationError {
    fn new(rule: &str, field: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            field: field.to_string(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &UpdaterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_urls(config));
    errors.extend(validate_network(config));

    if config.host.editor_cli.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-editor-cli",
            "host.editor_cli",
            "host.editor_cli must name the editor command".to_string(),
        ));
    }

    errors
}

fn validate_urls(config: &UpdaterConfig) -> Vec<ValidationError> {
    let candidates = [
        ("release_index_url", Some(&config.release_index_url)),
        ("enterprise.server_url", config.enterprise.server_url.as_ref()),
        (
            "enterprise.updater_server_url",
            config.enterprise.updater_server_url.as_ref(),
        ),
    ];

    candidates
        .into_iter()
        .filter_map(|(field, value)| {
            let value = value?;
            if is_http_url(value) {
                None
            } else {
                Some(ValidationError::new(
                    "invalid-url",
                    field,
                    format!("{} must be an http(s) URL, got '{}'", field, value),
                ))
            }
        })
        .collect()
}

fn validate_network(config: &UpdaterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.network.fetch_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "network.fetch_timeout_secs",
            "network.fetch_timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.network.download_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "network.download_timeout_secs",
            "network.download_timeout_secs must be greater than zero".to_string(),
        ));
    }

    errors
}

fn is_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

/// Validate and return a single error joining every message.
pub fn validate(config: &UpdaterConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(UpdaterError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
