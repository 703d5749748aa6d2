//! Enterprise (self-hosted server) activation.
//!
//! Activation removes conflicting extensions, resolves the server URL,
//! probes the server, prepares the completion-engine launch and then runs the
//! pre-release update flow.

pub mod activation;
pub mod conflicts;
pub mod server;

pub use activation::{activate, ActivationOutcome, ActivationReport, LaunchPlan};
pub use conflicts::{find_conflicts, uninstall_conflicting_extensions, ConflictResolution};
pub use server::{binary_args, is_healthy_server, proxy_bypass_env, resolve_server_url, server_host};
