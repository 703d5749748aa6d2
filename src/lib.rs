//! Pre-release channel updater for an editor completion extension.
//!
//! Decides whether the newest pre-release build in a remote release index
//! should replace the installed extension, installs it through the editor
//! host and remembers what was installed. Also carries the enterprise
//! activation sequence and the one-shot beta channel notice.
//!
//! # Modules
//!
//! - [`cli`] - Command-line host and argument parsing
//! - [`config`] - Layered configuration loading and validation
//! - [`enterprise`] - Enterprise activation, conflicts and server settings
//! - [`error`] - Error types and result aliases
//! - [`host`] - Editor host commands and the command registry
//! - [`state`] - Persisted global state
//! - [`ui`] - Notifications, prompts, spinners and terminal output
//! - [`updates`] - Version arbitration, release lookup and the update run
//!
//! # Example
//!
//! ```
//! use prerelease_updater::updates::should_install;
//!
//! assert!(should_install(Some("3.1.0"), "3.2.0-alpha.1"));
//! assert!(should_install(Some("3.2.0"), "3.2.0-alpha.1"));
//! assert!(!should_install(Some("3.3.0"), "3.2.0-alpha.1"));
//! assert!(!should_install(None, "9999.9999.9999"));
//! ```

pub mod cli;
pub mod config;
pub mod enterprise;
pub mod error;
pub mod host;
pub mod state;
pub mod ui;
pub mod updates;

pub use error::{Result, UpdaterError};
