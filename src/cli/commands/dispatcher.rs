//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`Environment`] with the loaded config and state location
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::{load_config, validate, ConfigPaths, UpdaterConfig};
use crate::error::Result;
use crate::host::EditorCliHost;
use crate::state::FileStateStore;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Loaded configuration plus where state and config live.
#[derive(Debug, Clone)]
pub struct Environment {
    pub config: UpdaterConfig,
    pub state_dir: PathBuf,
    /// File the user should edit to change settings.
    pub config_path: Option<PathBuf>,
}

impl Environment {
    /// Load and validate configuration for the given CLI flags.
    pub fn load(config_override: Option<&Path>, state_dir_override: Option<&Path>) -> Result<Self> {
        let config = load_config(config_override)?;
        validate(&config)?;
        Ok(Self::new(config, config_override, state_dir_override))
    }

    /// Build from an already loaded config.
    pub fn new(
        config: UpdaterConfig,
        config_override: Option<&Path>,
        state_dir_override: Option<&Path>,
    ) -> Self {
        let state_dir = state_dir_override
            .map(Path::to_path_buf)
            .or_else(|| config.state_dir.clone())
            .unwrap_or_else(FileStateStore::default_dir);
        let config_path = config_override
            .map(Path::to_path_buf)
            .or_else(ConfigPaths::user_global_path);

        Self {
            config,
            state_dir,
            config_path,
        }
    }

    pub fn open_state(&self) -> Result<FileStateStore> {
        FileStateStore::open(&self.state_dir)
    }

    pub fn editor_host(&self) -> EditorCliHost {
        EditorCliHost::new(self.config.host.editor_cli.clone(), self.config_path.clone())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    env: Environment,
}

impl CommandDispatcher {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(&self.env, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Activate(args)) => {
                let cmd = super::activate::ActivateCommand::new(&self.env, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(&self.env, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Reset(args)) => {
                let cmd = super::reset::ResetCommand::new(&self.env, args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::check::CheckCommand::new(&self.env, CheckArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
