//! Shared display helpers for run outcomes.
//!
//! Used by `check` and `activate` so both report an update run the same way.

use crate::enterprise::ConflictResolution;
use crate::ui::UserInterface;
use crate::updates::RunOutcome;

/// One-line summary of an update run.
pub fn outcome_line(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::ChannelDisabled => "Pre-release channel is not enabled".to_string(),
        RunOutcome::NoArtifact => "No pre-release available".to_string(),
        RunOutcome::UpToDate { current, candidate } => format!(
            "Up to date (current {}, latest pre-release {})",
            current.as_deref().unwrap_or("unknown"),
            candidate.as_deref().unwrap_or("unknown")
        ),
        RunOutcome::Installed { version, .. } => format!("Installed pre-release {}", version),
        RunOutcome::Cancelled { stage } => format!("Update cancelled while {}", stage),
        RunOutcome::Failed { stage, error } => {
            format!("Update skipped while {}: {}", stage, error)
        }
    }
}

/// Print an update run outcome, styled by severity.
pub fn show_outcome(ui: &mut dyn UserInterface, outcome: &RunOutcome) {
    let line = outcome_line(outcome);
    match outcome {
        RunOutcome::Installed { .. } => ui.success(&line),
        RunOutcome::Failed { .. } | RunOutcome::Cancelled { .. } => ui.warning(&line),
        _ => ui.message(&line),
    }
}

/// Print the result of the conflicting extension check.
pub fn show_conflicts(ui: &mut dyn UserInterface, resolution: Option<&ConflictResolution>) {
    match resolution {
        None => ui.warning("Could not check for conflicting extensions"),
        Some(ConflictResolution::NoConflicts) => {}
        Some(ConflictResolution::Declined { conflicts }) => ui.warning(&format!(
            "Conflicting extensions left installed: {}",
            conflicts.join(", ")
        )),
        Some(ConflictResolution::Uninstalled { removed, failed }) => {
            if !removed.is_empty() {
                ui.success(&format!("Removed {}", removed.join(", ")));
            }
            if !failed.is_empty() {
                ui.warning(&format!("Could not remove {}", failed.join(", ")));
            }
        }
    }
}
