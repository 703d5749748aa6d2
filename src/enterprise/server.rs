//! Enterprise server URL handling.

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

use crate::config::EnterpriseConfig;
use crate::error::{Result, UpdaterError};
use crate::state::{GlobalState, SERVER_URL_KEY};

/// Client name the completion engine reports for enterprise installs.
pub const ENTERPRISE_CLIENT: &str = "vscode-enterprise";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the server URL.
///
/// Order: configured URL, a URL copied earlier, then the legacy updater
/// setting. A legacy URL is copied into the global state so later runs find
/// it without the legacy setting.
pub fn resolve_server_url(
    config: &EnterpriseConfig,
    state: &mut dyn GlobalState,
) -> Result<Option<String>> {
    if let Some(url) = non_empty(config.server_url.as_deref()) {
        return Ok(Some(url.to_string()));
    }

    if let Some(url) = state.get_string(SERVER_URL_KEY) {
        if !url.trim().is_empty() {
            return Ok(Some(url));
        }
    }

    match non_empty(config.updater_server_url.as_deref()) {
        Some(legacy) => {
            tracing::info!(url = legacy, "Copying server URL from legacy updater setting");
            state.update(SERVER_URL_KEY, Value::String(legacy.to_string()))?;
            Ok(Some(legacy.to_string()))
        }
        None => Ok(None),
    }
}

/// Host part of a server URL.
pub fn server_host(server_url: &str) -> Option<String> {
    Url::parse(server_url)
        .ok()?
        .host_str()
        .map(str::to_string)
}

/// Arguments the completion engine is started with.
pub fn binary_args(server_url: &str) -> Vec<String> {
    vec![
        "--no_bootstrap".to_string(),
        format!("--cloud2_url={}", server_url),
        format!("--client={}", ENTERPRISE_CLIENT),
    ]
}

/// Environment that keeps engine traffic to the server off the proxy.
///
/// Empty when proxy support is enabled or the URL has no host.
pub fn proxy_bypass_env(server_url: &str, use_proxy_support: bool) -> Vec<(String, String)> {
    if use_proxy_support {
        return Vec::new();
    }
    match server_host(server_url) {
        Some(host) => vec![
            ("no_proxy".to_string(), host.clone()),
            ("NO_PROXY".to_string(), host),
        ],
        None => Vec::new(),
    }
}

/// Probe the server with a GET on the server URL itself.
///
/// Any transport error or non-2xx status counts as unhealthy. Deployments
/// that serve nothing at the root need a dedicated health path instead.
pub fn is_healthy_server(server_url: &str, timeout: Duration) -> Result<bool> {
    let client = Client::builder()
        .user_agent(concat!("prerelease-updater/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| UpdaterError::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

    match client.get(server_url).send() {
        Ok(response) => {
            let healthy = response.status().is_success();
            tracing::debug!(url = server_url, status = %response.status(), healthy, "Server probed");
            Ok(healthy)
        }
        Err(e) => {
            tracing::debug!(url = server_url, error = %e, "Server probe failed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryState;
    use httpmock::prelude::*;

    fn enterprise(server: Option<&str>, legacy: Option<&str>) -> EnterpriseConfig {
        EnterpriseConfig {
            server_url: server.map(str::to_string),
            updater_server_url: legacy.map(str::to_string),
            ..EnterpriseConfig::default()
        }
    }

    #[test]
    fn configured_url_wins() {
        let mut state = MemoryState::new();
        let url = resolve_server_url(
            &enterprise(Some("https://a.example"), Some("https://legacy.example")),
            &mut state,
        )
        .unwrap();

        assert_eq!(url.as_deref(), Some("https://a.example"));
        assert_eq!(state.write_count(), 0);
    }

    #[test]
    fn legacy_url_is_copied_once() {
        let mut state = MemoryState::new();
        let config = enterprise(None, Some("https://legacy.example"));

        let url = resolve_server_url(&config, &mut state).unwrap();
        assert_eq!(url.as_deref(), Some("https://legacy.example"));
        assert_eq!(
            state.get_string(SERVER_URL_KEY).as_deref(),
            Some("https://legacy.example")
        );

        resolve_server_url(&config, &mut state).unwrap();
        assert_eq!(state.write_count(), 1);
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut state = MemoryState::new();
        let url = resolve_server_url(&enterprise(Some("  "), Some("")), &mut state).unwrap();
        assert_eq!(url, None);
    }

    #[test]
    fn binary_args_carry_server() {
        assert_eq!(
            binary_args("https://tabnine.corp"),
            vec![
                "--no_bootstrap",
                "--cloud2_url=https://tabnine.corp",
                "--client=vscode-enterprise"
            ]
        );
    }

    #[test]
    fn proxy_bypass_uses_host() {
        let env = proxy_bypass_env("https://tabnine.corp:8443/path", false);
        assert_eq!(
            env,
            vec![
                ("no_proxy".to_string(), "tabnine.corp".to_string()),
                ("NO_PROXY".to_string(), "tabnine.corp".to_string()),
            ]
        );
        assert!(proxy_bypass_env("https://tabnine.corp", true).is_empty());
        assert!(proxy_bypass_env("not a url", false).is_empty());
    }

    #[test]
    fn healthy_server_returns_true() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200);
        });

        assert!(is_healthy_server(&server.url("/"), Duration::from_secs(5)).unwrap());
        mock.assert_calls(1);
    }

    #[test]
    fn server_error_is_unhealthy() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(503);
        });

        assert!(!is_healthy_server(&server.url("/"), Duration::from_secs(5)).unwrap());
    }

    #[test]
    fn unreachable_server_is_unhealthy() {
        assert!(!is_healthy_server("http://127.0.0.1:1/", Duration::from_secs(2)).unwrap());
    }

    #[test]
    fn probe_targets_server_url_not_a_health_path() {
        let server = MockServer::start();
        let health = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        });
        let root = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(404);
        });

        assert!(!is_healthy_server(&server.url("/"), Duration::from_secs(5)).unwrap());
        root.assert_calls(1);
        health.assert_calls(0);
    }
}
