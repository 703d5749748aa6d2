//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once and routes subcommands (`check`, `activate`, `status`,
//! `reset`) to their implementations.

pub mod activate;
pub mod check;
pub mod dispatcher;
pub mod display;
pub mod reset;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Environment};
