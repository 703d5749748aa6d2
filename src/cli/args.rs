//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pre-release channel updater for the editor completion extension.
#[derive(Debug, Parser)]
#[command(name = "prerelease-updater")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (layered over ~/.prerelease-updater/config.yml)
    #[arg(short, long, global = true, env = "PRERELEASE_UPDATER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding state.yml (overrides config and default)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; notifications are declined unless overridden
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check for and install a newer pre-release (default if no command specified)
    Check(CheckArgs),

    /// Run the enterprise activation sequence
    Activate(ActivateArgs),

    /// Show channel settings and the recorded install
    Status(StatusArgs),

    /// Clear recorded state
    Reset(ResetArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Skip the beta channel notice
    #[arg(long)]
    pub no_notice: bool,
}

/// Arguments for the `activate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActivateArgs {
    /// Print the completion engine launch plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Also query the release index for the latest pre-release
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the `reset` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResetArgs {
    /// Also clear the beta notice flag and copied server URL
    #[arg(long)]
    pub all: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}
