//! Activate command implementation.
//!
//! `prerelease-updater activate` runs the enterprise activation sequence and
//! prints the completion engine launch plan.

use crate::cli::args::ActivateArgs;
use crate::enterprise::{activate, ActivationOutcome};
use crate::error::Result;
use crate::host::HostContext;
use crate::ui::UserInterface;
use crate::updates::UpdateOrchestrator;

use super::dispatcher::{Command, CommandResult, Environment};
use super::display::{show_conflicts, show_outcome};

/// The activate command implementation.
pub struct ActivateCommand<'a> {
    env: &'a Environment,
    args: ActivateArgs,
}

impl<'a> ActivateCommand<'a> {
    pub fn new(env: &'a Environment, args: ActivateArgs) -> Self {
        Self { env, args }
    }
}

impl Command for ActivateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut state = self.env.open_state()?;
        let mut host = self.env.editor_host();
        let mut orchestrator = UpdateOrchestrator::from_config(&self.env.config)?;

        if !self.args.json {
            ui.show_header("Enterprise activation");
        }

        let mut ctx = HostContext::new(&mut host, &mut state, ui, &self.env.config);
        let report = activate(&mut ctx, &mut orchestrator);

        show_conflicts(ui, report.conflicts.as_ref());

        match &report.outcome {
            ActivationOutcome::MissingServerUrl => {
                ui.warning("No enterprise server URL configured (enterprise.server_url)");
                Ok(CommandResult::failure(1))
            }
            ActivationOutcome::UnhealthyServer { .. } => Ok(CommandResult::failure(1)),
            ActivationOutcome::Ready { plan, update } => {
                if self.args.json {
                    let json = serde_json::to_string_pretty(plan).map_err(anyhow::Error::from)?;
                    println!("{}", json);
                } else {
                    ui.success(&format!("Server {} is healthy", plan.server_url));
                    ui.message(&format!("Engine arguments: {}", plan.args.join(" ")));
                    for (key, value) in &plan.env {
                        ui.message(&format!("Engine environment: {}={}", key, value));
                    }
                    show_outcome(ui, update);
                }
                Ok(CommandResult::success())
            }
        }
    }
}
