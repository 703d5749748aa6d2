//! Reset command implementation.
//!
//! `prerelease-updater reset` forgets the recorded pre-release install so the
//! next check compares against the running extension version again.

use crate::cli::args::ResetArgs;
use crate::error::Result;
use crate::state::{
    GlobalState, BETA_CHANNEL_MESSAGE_SHOWN_KEY, LAST_ALPHA_INSTALLED_AT_KEY,
    LAST_ALPHA_SHA256_KEY, LAST_ALPHA_VERSION_KEY, SERVER_URL_KEY,
};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult, Environment};

/// Keys cleared by a plain reset.
pub const INSTALL_KEYS: [&str; 3] = [
    LAST_ALPHA_VERSION_KEY,
    LAST_ALPHA_INSTALLED_AT_KEY,
    LAST_ALPHA_SHA256_KEY,
];

/// Keys additionally cleared by `--all`.
pub const EXTRA_KEYS: [&str; 2] = [BETA_CHANNEL_MESSAGE_SHOWN_KEY, SERVER_URL_KEY];

/// The reset command implementation.
pub struct ResetCommand<'a> {
    env: &'a Environment,
    args: ResetArgs,
}

impl<'a> ResetCommand<'a> {
    pub fn new(env: &'a Environment, args: ResetArgs) -> Self {
        Self { env, args }
    }
}

impl Command for ResetCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut state = self.env.open_state()?;

        let keys: Vec<&str> = if self.args.all {
            INSTALL_KEYS.iter().chain(EXTRA_KEYS.iter()).copied().collect()
        } else {
            INSTALL_KEYS.to_vec()
        };

        if self.args.all && !self.args.yes {
            let prompt = Prompt::new(
                "reset_all",
                "Also forget the beta notice and the copied server URL?",
                false,
            );
            if !ui.confirm(&prompt)? {
                ui.warning("Reset cancelled");
                return Ok(CommandResult::failure(1));
            }
        }

        let mut cleared = 0;
        for key in keys {
            if state.get(key).is_some() {
                state.remove(key)?;
                cleared += 1;
            }
        }

        tracing::info!(cleared, all = self.args.all, "State reset");
        if cleared == 0 {
            ui.message("Nothing to reset");
        } else {
            ui.success(&format!("Cleared {} recorded value(s)", cleared));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpdaterConfig;
    use crate::state::FileStateStore;
    use crate::ui::MockUI;
    use serde_json::Value;
    use tempfile::TempDir;

    fn seeded(dir: &std::path::Path) {
        let mut state = FileStateStore::open(dir).unwrap();
        state
            .update(LAST_ALPHA_VERSION_KEY, Value::String("3.1.0-alpha.2".into()))
            .unwrap();
        state
            .update(BETA_CHANNEL_MESSAGE_SHOWN_KEY, Value::Bool(true))
            .unwrap();
    }

    #[test]
    fn plain_reset_keeps_beta_flag() {
        let temp = TempDir::new().unwrap();
        seeded(temp.path());
        let env = Environment::new(UpdaterConfig::default(), None, Some(temp.path()));

        let mut ui = MockUI::new();
        let result = ResetCommand::new(&env, ResetArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let state = FileStateStore::open(temp.path()).unwrap();
        assert_eq!(state.get(LAST_ALPHA_VERSION_KEY), None);
        assert_eq!(state.get_bool(BETA_CHANNEL_MESSAGE_SHOWN_KEY), Some(true));
        assert!(ui.prompts_shown().is_empty());
    }

    #[test]
    fn reset_all_declined_changes_nothing() {
        let temp = TempDir::new().unwrap();
        seeded(temp.path());
        let env = Environment::new(UpdaterConfig::default(), None, Some(temp.path()));

        let mut ui = MockUI::new();
        let result = ResetCommand::new(
            &env,
            ResetArgs {
                all: true,
                yes: false,
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert!(!result.success);
        let state = FileStateStore::open(temp.path()).unwrap();
        assert!(state.get(LAST_ALPHA_VERSION_KEY).is_some());
    }

    #[test]
    fn reset_all_confirmed_clears_everything() {
        let temp = TempDir::new().unwrap();
        seeded(temp.path());
        let env = Environment::new(UpdaterConfig::default(), None, Some(temp.path()));

        let mut ui = MockUI::new();
        ui.set_prompt_response("reset_all", true);
        ResetCommand::new(
            &env,
            ResetArgs {
                all: true,
                yes: false,
            },
        )
        .execute(&mut ui)
        .unwrap();

        let state = FileStateStore::open(temp.path()).unwrap();
        assert!(state.keys().is_empty());
        assert!(ui.has_success("Cleared 2"));
    }

    #[test]
    fn empty_state_has_nothing_to_reset() {
        let temp = TempDir::new().unwrap();
        let env = Environment::new(UpdaterConfig::default(), None, Some(temp.path()));

        let mut ui = MockUI::new();
        ResetCommand::new(&env, ResetArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("Nothing to reset"));
    }
}
