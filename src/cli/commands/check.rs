//! Check command implementation.
//!
//! `prerelease-updater check` shows the beta channel notice when due and runs
//! one pre-release update.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::host::HostContext;
use crate::ui::UserInterface;
use crate::updates::{handle_prerelease_channels, UpdateOrchestrator};

use super::dispatcher::{Command, CommandResult, Environment};
use super::display::show_outcome;

/// The check command implementation.
pub struct CheckCommand<'a> {
    env: &'a Environment,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    pub fn new(env: &'a Environment, args: CheckArgs) -> Self {
        Self { env, args }
    }

    pub fn args(&self) -> &CheckArgs {
        &self.args
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut state = self.env.open_state()?;
        let mut host = self.env.editor_host();
        let mut orchestrator = UpdateOrchestrator::from_config(&self.env.config)?;

        ui.show_header("Pre-release channel");

        let mut ctx = HostContext::new(&mut host, &mut state, ui, &self.env.config);
        let outcome = if self.args.no_notice {
            orchestrator.run(&mut ctx)
        } else {
            handle_prerelease_channels(&mut orchestrator, &mut ctx)
        };

        show_outcome(ui, &outcome);
        // A skipped run is not a command failure.
        Ok(CommandResult::success())
    }
}
