//! Enterprise activation sequence.

use serde::Serialize;
use std::path::Path;
use std::process::Command;

use crate::host::{HostContext, OPEN_SETTINGS_COMMAND, SERVER_URL_SETTING};
use crate::ui::Notification;
use crate::updates::{handle_prerelease_channels, RunOutcome, UpdateOrchestrator};

use super::conflicts::{uninstall_conflicting_extensions, ConflictResolution};
use super::server::{binary_args, is_healthy_server, proxy_bypass_env, resolve_server_url};

pub const SERVER_URL_NOTICE_ID: &str = "enterprise-server-url";
pub const SERVER_URL_NOTICE_TEXT: &str =
    "Please set your Tabnine Enterprise server URL to start using Tabnine.";
pub const SERVER_URL_NOTICE_BUTTON: &str = "Open Settings";

/// How the completion engine should be started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub server_url: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl LaunchPlan {
    pub fn new(server_url: &str, use_proxy_support: bool) -> Self {
        Self {
            server_url: server_url.to_string(),
            args: binary_args(server_url),
            env: proxy_bypass_env(server_url, use_proxy_support),
        }
    }

    /// Command that starts `binary` with this plan.
    pub fn command(&self, binary: &Path) -> Command {
        let mut cmd = Command::new(binary);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

/// Where activation stopped.
#[derive(Debug)]
pub enum ActivationOutcome {
    /// No server URL is configured; the user was asked to set one.
    MissingServerUrl,
    /// The server did not answer the probe.
    UnhealthyServer { server_url: String },
    /// The engine can start and the update run completed.
    Ready { plan: LaunchPlan, update: RunOutcome },
}

/// Everything activation did.
#[derive(Debug)]
pub struct ActivationReport {
    /// `None` when the conflict check itself failed.
    pub conflicts: Option<ConflictResolution>,
    pub outcome: ActivationOutcome,
}

/// Activate the enterprise extension.
///
/// Each host interaction is isolated: a failure is logged and activation
/// moves on where it can.
pub fn activate(
    ctx: &mut HostContext<'_>,
    orchestrator: &mut UpdateOrchestrator,
) -> ActivationReport {
    let conflicts = match uninstall_conflicting_extensions(ctx) {
        Ok(resolution) => Some(resolution),
        Err(e) => {
            tracing::warn!(error = %e, "Conflicting extension check failed");
            None
        }
    };

    let outcome = activate_server(ctx, orchestrator);
    ActivationReport { conflicts, outcome }
}

fn activate_server(
    ctx: &mut HostContext<'_>,
    orchestrator: &mut UpdateOrchestrator,
) -> ActivationOutcome {
    let server_url = match resolve_server_url(&ctx.config.enterprise, &mut *ctx.state) {
        Ok(Some(url)) => url,
        Ok(None) => {
            prompt_for_server_url(ctx);
            return ActivationOutcome::MissingServerUrl;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve server URL");
            prompt_for_server_url(ctx);
            return ActivationOutcome::MissingServerUrl;
        }
    };

    let healthy = is_healthy_server(&server_url, ctx.config.network.fetch_timeout())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Server health probe failed");
            false
        });
    if !healthy {
        tracing::warn!(url = %server_url, "Server is not healthy");
        ctx.ui.warning(&format!(
            "Tabnine Enterprise server {} is not reachable",
            server_url
        ));
        return ActivationOutcome::UnhealthyServer { server_url };
    }

    let plan = LaunchPlan::new(&server_url, ctx.config.enterprise.use_proxy_support);
    tracing::info!(url = %server_url, args = ?plan.args, "Completion engine launch plan ready");

    let update = handle_prerelease_channels(orchestrator, ctx);
    ActivationOutcome::Ready { plan, update }
}

fn prompt_for_server_url(ctx: &mut HostContext<'_>) {
    let notice = Notification::new(
        SERVER_URL_NOTICE_ID,
        SERVER_URL_NOTICE_TEXT,
        SERVER_URL_NOTICE_BUTTON,
    );
    match ctx.ui.notify(&notice) {
        Ok(true) => {
            if let Err(e) = ctx.execute(OPEN_SETTINGS_COMMAND, &[SERVER_URL_SETTING.to_string()]) {
                tracing::warn!(error = %e, "Failed to open server URL settings");
            }
        }
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to show server URL notice"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpdaterConfig;
    use crate::host::MockHost;
    use crate::state::MemoryState;
    use crate::ui::MockUI;
    use httpmock::prelude::*;

    #[test]
    fn launch_plan_builds_command() {
        let plan = LaunchPlan::new("https://tabnine.corp", false);
        let cmd = plan.command(Path::new("/opt/tabnine/engine"));

        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, plan.args);
        assert!(cmd
            .get_envs()
            .any(|(k, v)| k == "NO_PROXY" && v.is_some_and(|v| v == "tabnine.corp")));
    }

    #[test]
    fn missing_server_url_prompts_settings() {
        let mut host = MockHost::new();
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        ui.set_notification_response(SERVER_URL_NOTICE_ID, true);
        let config = UpdaterConfig::default();
        let mut orchestrator = UpdateOrchestrator::from_config(&config).unwrap();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let report = activate(&mut ctx, &mut orchestrator);

        assert!(matches!(report.outcome, ActivationOutcome::MissingServerUrl));
        assert_eq!(report.conflicts, Some(ConflictResolution::NoConflicts));
        assert_eq!(
            host.args_for(OPEN_SETTINGS_COMMAND),
            vec![&[SERVER_URL_SETTING.to_string()][..]]
        );
    }

    #[test]
    fn unhealthy_server_stops_activation() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(500);
        });

        let mut host = MockHost::new();
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        let mut config = UpdaterConfig::default();
        config.enterprise.server_url = Some(server.url("/"));
        let mut orchestrator = UpdateOrchestrator::from_config(&config).unwrap();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let report = activate(&mut ctx, &mut orchestrator);

        assert!(matches!(
            report.outcome,
            ActivationOutcome::UnhealthyServer { .. }
        ));
        assert!(ui.has_warning("not reachable"));
    }

    #[test]
    fn healthy_server_yields_plan_and_runs_update() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200);
        });

        let mut host = MockHost::new();
        host.fail_listing("editor missing");
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        let mut config = UpdaterConfig::default();
        config.enterprise.server_url = Some(server.url("/"));
        let mut orchestrator = UpdateOrchestrator::from_config(&config).unwrap();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let report = activate(&mut ctx, &mut orchestrator);

        assert!(report.conflicts.is_none());
        match report.outcome {
            ActivationOutcome::Ready { plan, update } => {
                assert_eq!(plan.args[0], "--no_bootstrap");
                assert_eq!(plan.env.len(), 2);
                // No host version configured, so the channel is off.
                assert!(matches!(update, RunOutcome::ChannelDisabled));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
