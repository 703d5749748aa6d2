//! The pre-release update run.
//!
//! A run walks `Checking → Evaluating → Downloading → Installing → Persisting
//! → Notifying` and returns to `Idle`. Any failure ends the run at the stage
//! it happened in; the error is logged and reported as
//! [`RunOutcome::Failed`], never returned to the caller.

use chrono::Utc;
use serde_json::Value;
use std::fmt;

use crate::config::UpdaterConfig;
use crate::error::{Result, UpdaterError};
use crate::host::{HostContext, INSTALL_EXTENSION_COMMAND, RELOAD_WINDOW_COMMAND};
use crate::state::{
    GlobalState, LAST_ALPHA_INSTALLED_AT_KEY, LAST_ALPHA_SHA256_KEY, LAST_ALPHA_VERSION_KEY,
};
use crate::ui::Notification;

use super::channel::{show_beta_channel_notice_if_needed, user_consumes_prerelease_updates, BRAND_NAME};
use super::download::ArtifactDownloader;
use super::oracle::ReleaseOracle;
use super::version::{should_install, version_from_artifact_url};

pub const UPDATE_NOTICE_ID: &str = "prerelease-installer-update";
pub const UPDATE_NOTICE_BUTTON: &str = "Reload";

/// Text of the reload prompt after an install.
pub fn update_notice_text(version: &str) -> String {
    format!(
        "{} has been updated to {} version. Please reload the window for the changes to take effect.",
        BRAND_NAME, version
    )
}

/// Stage of an update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStage {
    Idle,
    Checking,
    Evaluating,
    Downloading,
    Installing,
    Persisting,
    Notifying,
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::Evaluating => "evaluating",
            Self::Downloading => "downloading",
            Self::Installing => "installing",
            Self::Persisting => "persisting",
            Self::Notifying => "notifying",
        };
        f.write_str(name)
    }
}

/// How an update run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The user does not receive pre-release builds.
    ChannelDisabled,
    /// The index has no installable pre-release.
    NoArtifact,
    /// The candidate is not eligible over the current version.
    UpToDate {
        current: Option<String>,
        candidate: Option<String>,
    },
    /// The candidate was installed and recorded.
    Installed {
        version: String,
        reload_requested: bool,
    },
    /// Cancellation was requested; nothing was recorded.
    Cancelled { stage: UpdateStage },
    /// The run was skipped because a stage failed.
    Failed {
        stage: UpdateStage,
        error: UpdaterError,
    },
}

impl RunOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }

    /// Short label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChannelDisabled => "channel_disabled",
            Self::NoArtifact => "no_artifact",
            Self::UpToDate { .. } => "up_to_date",
            Self::Installed { .. } => "installed",
            Self::Cancelled { .. } => "cancelled",
            Self::Failed { .. } => "failed",
        }
    }
}

/// The version an install is compared against.
///
/// The last installed pre-release wins; otherwise the running extension
/// version from config.
pub fn current_version(state: &dyn GlobalState, config: &UpdaterConfig) -> Option<String> {
    state
        .get_string(LAST_ALPHA_VERSION_KEY)
        .or_else(|| config.channel.extension_version.clone())
}

/// Sequences one pre-release update run.
pub struct UpdateOrchestrator {
    oracle: ReleaseOracle,
    downloader: ArtifactDownloader,
    stage: UpdateStage,
}

impl UpdateOrchestrator {
    pub fn new(oracle: ReleaseOracle, downloader: ArtifactDownloader) -> Self {
        Self {
            oracle,
            downloader,
            stage: UpdateStage::Idle,
        }
    }

    /// Build the oracle and downloader from config.
    pub fn from_config(config: &UpdaterConfig) -> Result<Self> {
        let oracle = ReleaseOracle::new(
            config.release_index_url.clone(),
            config.network.fetch_timeout(),
        )?;
        let downloader = ArtifactDownloader::new(config.network.download_timeout())?;
        Ok(Self::new(oracle, downloader))
    }

    pub fn stage(&self) -> UpdateStage {
        self.stage
    }

    /// Run once. Never fails; see [`RunOutcome`].
    pub fn run(&mut self, ctx: &mut HostContext<'_>) -> RunOutcome {
        if !user_consumes_prerelease_updates(&ctx.config.channel) {
            tracing::debug!("Pre-release channel disabled, skipping update run");
            return RunOutcome::ChannelDisabled;
        }

        let outcome = match self.try_run(ctx) {
            Ok(outcome) => outcome,
            Err(UpdaterError::Cancelled { .. }) => {
                tracing::info!(stage = %self.stage, "Update run cancelled");
                RunOutcome::Cancelled { stage: self.stage }
            }
            Err(error) => {
                tracing::warn!(
                    stage = %self.stage,
                    kind = error.kind(),
                    error = %error,
                    "Update run skipped"
                );
                RunOutcome::Failed {
                    stage: self.stage,
                    error,
                }
            }
        };

        self.enter(UpdateStage::Idle);
        tracing::info!(outcome = outcome.label(), "Update run finished");
        outcome
    }

    fn enter(&mut self, stage: UpdateStage) {
        tracing::debug!(from = %self.stage, to = %stage, "Update stage");
        self.stage = stage;
    }

    fn try_run(&mut self, ctx: &mut HostContext<'_>) -> Result<RunOutcome> {
        self.enter(UpdateStage::Checking);
        let Some(artifact) = self.oracle.fetch_latest_prerelease_artifact(&ctx.cancel)? else {
            tracing::info!("No pre-release artifact available");
            return Ok(RunOutcome::NoArtifact);
        };

        self.enter(UpdateStage::Evaluating);
        let current = current_version(&*ctx.state, ctx.config);
        let candidate = version_from_artifact_url(&artifact.download_url);
        let eligible = candidate
            .as_deref()
            .is_some_and(|c| should_install(current.as_deref(), c));
        tracing::debug!(
            id = artifact.id,
            current = ?current,
            candidate = ?candidate,
            eligible,
            "Evaluated pre-release artifact"
        );
        let version = match candidate {
            Some(version) if eligible => version,
            candidate => return Ok(RunOutcome::UpToDate { current, candidate }),
        };

        self.enter(UpdateStage::Downloading);
        let downloaded = self
            .downloader
            .download(&artifact.download_url, &ctx.cancel)?;

        self.enter(UpdateStage::Installing);
        ctx.cancel.check("installing")?;
        let path = downloaded.path().to_path_buf();
        ctx.execute(INSTALL_EXTENSION_COMMAND, &[path.display().to_string()])
            .map_err(|e| UpdaterError::Install {
                path: path.clone(),
                message: e.to_string(),
            })?;
        tracing::info!(%version, "Installed pre-release");

        self.enter(UpdateStage::Persisting);
        // The version key goes last so a failed metadata write leaves it unchanged.
        ctx.state.update(
            LAST_ALPHA_INSTALLED_AT_KEY,
            Value::String(Utc::now().to_rfc3339()),
        )?;
        ctx.state.update(
            LAST_ALPHA_SHA256_KEY,
            Value::String(downloaded.sha256().to_string()),
        )?;
        ctx.state
            .update(LAST_ALPHA_VERSION_KEY, Value::String(version.clone()))?;
        drop(downloaded);

        self.enter(UpdateStage::Notifying);
        let reload_requested = self.notify_installed(ctx, &version);

        Ok(RunOutcome::Installed {
            version,
            reload_requested,
        })
    }

    /// Offer a reload. Failures here do not undo the install.
    fn notify_installed(&self, ctx: &mut HostContext<'_>, version: &str) -> bool {
        let notice = Notification::new(
            UPDATE_NOTICE_ID,
            update_notice_text(version),
            UPDATE_NOTICE_BUTTON,
        );

        match ctx.ui.notify(&notice) {
            Ok(true) => {
                if let Err(e) = ctx.execute(RELOAD_WINDOW_COMMAND, &[]) {
                    tracing::warn!(error = %e, "Failed to reload window");
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to show reload notice");
                false
            }
        }
    }
}

/// Show the beta channel notice if due, then run the update.
///
/// Notice failures are logged and do not prevent the update run.
pub fn handle_prerelease_channels(
    orchestrator: &mut UpdateOrchestrator,
    ctx: &mut HostContext<'_>,
) -> RunOutcome {
    if let Err(e) = show_beta_channel_notice_if_needed(ctx) {
        tracing::warn!(error = %e, "Beta channel notice failed");
    }
    orchestrator.run(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryState;

    #[test]
    fn stage_display_names() {
        assert_eq!(UpdateStage::Checking.to_string(), "checking");
        assert_eq!(UpdateStage::Notifying.to_string(), "notifying");
        assert_eq!(UpdateStage::Idle.to_string(), "idle");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(RunOutcome::NoArtifact.label(), "no_artifact");
        assert!(RunOutcome::Installed {
            version: "1.0.0-alpha.1".to_string(),
            reload_requested: false
        }
        .is_installed());
        assert!(!RunOutcome::ChannelDisabled.is_installed());
    }

    #[test]
    fn current_version_prefers_persisted() {
        let mut state = MemoryState::new();
        let mut config = UpdaterConfig::default();
        config.channel.extension_version = Some("3.0.0".to_string());

        assert_eq!(current_version(&state, &config).as_deref(), Some("3.0.0"));

        state
            .update(LAST_ALPHA_VERSION_KEY, Value::String("3.1.0-alpha.2".into()))
            .unwrap();
        assert_eq!(
            current_version(&state, &config).as_deref(),
            Some("3.1.0-alpha.2")
        );
    }

    #[test]
    fn current_version_absent_without_baseline() {
        let state = MemoryState::new();
        assert_eq!(current_version(&state, &UpdaterConfig::default()), None);
    }

    #[test]
    fn update_notice_mentions_version() {
        let text = update_notice_text("3.2.0-alpha.1");
        assert!(text.contains("3.2.0-alpha.1"));
        assert!(text.contains("reload the window"));
    }

    #[test]
    fn new_orchestrator_is_idle() {
        let orchestrator = UpdateOrchestrator::from_config(&UpdaterConfig::default()).unwrap();
        assert_eq!(orchestrator.stage(), UpdateStage::Idle);
    }
}
