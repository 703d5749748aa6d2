//! Status command implementation.
//!
//! `prerelease-updater status` shows channel gating, the recorded install and
//! optionally the latest pre-release in the release index.

use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::state::{
    FileStateStore, GlobalState, BETA_CHANNEL_MESSAGE_SHOWN_KEY, LAST_ALPHA_INSTALLED_AT_KEY,
    LAST_ALPHA_SHA256_KEY, LAST_ALPHA_VERSION_KEY, SERVER_URL_KEY,
};
use crate::ui::UserInterface;
use crate::updates::{
    current_version, is_prerelease_channel_supported, should_install,
    user_consumes_prerelease_updates, version_from_artifact_url, CancellationToken,
    ReleaseOracle,
};

use super::dispatcher::{Command, CommandResult, Environment};

/// The status command implementation.
pub struct StatusCommand<'a> {
    env: &'a Environment,
    args: StatusArgs,
}

/// Everything `status` reports.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub state_file: String,
    pub channel_supported: bool,
    pub receives_prereleases: bool,
    pub beta_notice_shown: bool,
    pub current_version: Option<String>,
    pub last_installed: Option<String>,
    pub installed_at: Option<String>,
    pub sha256: Option<String>,
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteStatus>,
}

/// Latest pre-release in the release index.
#[derive(Debug, Serialize)]
pub struct RemoteStatus {
    pub release_id: Option<u64>,
    pub download_url: Option<String>,
    pub version: Option<String>,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> StatusCommand<'a> {
    pub fn new(env: &'a Environment, args: StatusArgs) -> Self {
        Self { env, args }
    }

    /// Collect the local part of the report.
    pub fn local_report(&self, state: &FileStateStore) -> StatusReport {
        let channel = &self.env.config.channel;
        StatusReport {
            state_file: state.path().display().to_string(),
            channel_supported: is_prerelease_channel_supported(channel),
            receives_prereleases: user_consumes_prerelease_updates(channel),
            beta_notice_shown: state
                .get_bool(BETA_CHANNEL_MESSAGE_SHOWN_KEY)
                .unwrap_or(false),
            current_version: current_version(state, &self.env.config),
            last_installed: state.get_string(LAST_ALPHA_VERSION_KEY),
            installed_at: state.get_string(LAST_ALPHA_INSTALLED_AT_KEY),
            sha256: state.get_string(LAST_ALPHA_SHA256_KEY),
            server_url: self
                .env
                .config
                .enterprise
                .server_url
                .clone()
                .or_else(|| state.get_string(SERVER_URL_KEY)),
            remote: None,
        }
    }

    fn remote_status(&self, current: Option<&str>, ui: &mut dyn UserInterface) -> RemoteStatus {
        let mut spinner = if self.args.json {
            None
        } else {
            Some(ui.start_spinner("Checking release index"))
        };

        let result = ReleaseOracle::new(
            self.env.config.release_index_url.clone(),
            self.env.config.network.fetch_timeout(),
        )
        .and_then(|oracle| oracle.fetch_latest_prerelease_artifact(&CancellationToken::new()));

        match result {
            Ok(Some(artifact)) => {
                let version = version_from_artifact_url(&artifact.download_url);
                let eligible = version
                    .as_deref()
                    .is_some_and(|v| should_install(current, v));
                if let Some(s) = spinner.as_mut() {
                    s.finish_success("Release index checked");
                }
                RemoteStatus {
                    release_id: Some(artifact.id),
                    download_url: Some(artifact.download_url),
                    version,
                    eligible,
                    error: None,
                }
            }
            Ok(None) => {
                if let Some(s) = spinner.as_mut() {
                    s.finish_skipped("No pre-release in the release index");
                }
                RemoteStatus {
                    release_id: None,
                    download_url: None,
                    version: None,
                    eligible: false,
                    error: None,
                }
            }
            Err(e) => {
                if let Some(s) = spinner.as_mut() {
                    s.finish_error("Release index unavailable");
                }
                RemoteStatus {
                    release_id: None,
                    download_url: None,
                    version: None,
                    eligible: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl Command for StatusCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let state = self.env.open_state()?;
        let mut report = self.local_report(&state);

        if self.args.remote {
            let current = report.current_version.clone();
            report.remote = Some(self.remote_status(current.as_deref(), ui));
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Pre-release status");
        ui.message(&format!("State file:          {}", report.state_file));
        ui.message(&format!(
            "Channel supported:   {}",
            yes_no(report.channel_supported)
        ));
        ui.message(&format!(
            "Receives pre-releases: {}",
            yes_no(report.receives_prereleases)
        ));
        ui.message(&format!(
            "Beta notice shown:   {}",
            yes_no(report.beta_notice_shown)
        ));
        ui.message(&format!(
            "Current version:     {}",
            or_none(&report.current_version)
        ));
        ui.message(&format!(
            "Last installed:      {}",
            or_none(&report.last_installed)
        ));
        if report.installed_at.is_some() {
            ui.message(&format!(
                "Installed at:        {}",
                or_none(&report.installed_at)
            ));
        }
        if self.env.config.enterprise.server_url.is_some() || report.server_url.is_some() {
            ui.message(&format!("Server URL:          {}", or_none(&report.server_url)));
        }

        if let Some(remote) = &report.remote {
            match &remote.error {
                Some(error) => ui.warning(&format!("Release index: {}", error)),
                None => {
                    ui.message(&format!("Latest pre-release:  {}", or_none(&remote.version)));
                    ui.message(&format!("Would install:       {}", yes_no(remote.eligible)));
                }
            }
        }

        Ok(CommandResult::success())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
