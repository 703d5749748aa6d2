//! Pre-release update flow.
//!
//! This module provides:
//! - Version arbitration ([`version`])
//! - Release index lookup ([`oracle`])
//! - Artifact download into a scoped temp file ([`download`])
//! - Channel gating and the beta channel notice ([`channel`])
//! - The update run itself ([`orchestrator`])

pub mod cancel;
pub mod channel;
pub mod download;
pub mod oracle;
pub mod orchestrator;
pub mod version;

pub use cancel::CancellationToken;
pub use channel::{
    is_prerelease_channel_supported, should_show_beta_channel_notice,
    show_beta_channel_notice_if_needed, user_consumes_prerelease_updates,
};
pub use download::{ArtifactDownloader, DownloadedArtifact};
pub use oracle::{select_latest_prerelease, ReleaseArtifact, ReleaseOracle, ReleaseRecord};
pub use orchestrator::{
    current_version, handle_prerelease_channels, RunOutcome, UpdateOrchestrator, UpdateStage,
};
pub use version::{coerce, is_alpha, should_install, version_from_artifact_url, VERSION};
