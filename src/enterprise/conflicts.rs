//! Removal of extensions that conflict with the enterprise build.

use crate::error::Result;
use crate::host::{HostContext, RELOAD_WINDOW_COMMAND, UNINSTALL_EXTENSION_COMMAND};
use crate::ui::Notification;

pub const CONFLICT_NOTICE_ID: &str = "enterprise-conflicting-extensions";
pub const CONFLICT_NOTICE_TEXT: &str = "⚠️ You have a conflicting version of Tabnine!";
pub const CONFLICT_NOTICE_BUTTON: &str = "Fix";

/// Result of the conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResolution {
    NoConflicts,
    /// The user did not press "Fix".
    Declined { conflicts: Vec<String> },
    /// Uninstall was attempted for every conflict, then the window reloaded.
    Uninstalled {
        removed: Vec<String>,
        failed: Vec<String>,
    },
}

/// Installed ids that appear in `conflicting`, compared case-insensitively.
pub fn find_conflicts(installed: &[String], conflicting: &[String]) -> Vec<String> {
    installed
        .iter()
        .filter(|id| conflicting.iter().any(|c| c.eq_ignore_ascii_case(id)))
        .cloned()
        .collect()
}

/// Offer to uninstall conflicting extensions.
///
/// A failed uninstall is logged and the remaining ones still run.
pub fn uninstall_conflicting_extensions(ctx: &mut HostContext<'_>) -> Result<ConflictResolution> {
    let installed = ctx.host.installed_extensions()?;
    let conflicts = find_conflicts(&installed, &ctx.config.enterprise.conflicting_extensions);

    if conflicts.is_empty() {
        return Ok(ConflictResolution::NoConflicts);
    }

    tracing::info!(?conflicts, "Conflicting extensions installed");
    let notice = Notification::new(CONFLICT_NOTICE_ID, CONFLICT_NOTICE_TEXT, CONFLICT_NOTICE_BUTTON);
    if !ctx.ui.notify(&notice)? {
        return Ok(ConflictResolution::Declined { conflicts });
    }

    let mut removed = Vec::new();
    let mut failed = Vec::new();
    for id in conflicts {
        match ctx.execute(UNINSTALL_EXTENSION_COMMAND, std::slice::from_ref(&id)) {
            Ok(()) => removed.push(id),
            Err(e) => {
                tracing::warn!(extension = %id, error = %e, "Error while removing extension");
                failed.push(id);
            }
        }
    }

    if let Err(e) = ctx.execute(RELOAD_WINDOW_COMMAND, &[]) {
        tracing::warn!(error = %e, "Failed to reload window");
    }

    Ok(ConflictResolution::Uninstalled { removed, failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpdaterConfig;
    use crate::host::MockHost;
    use crate::state::MemoryState;
    use crate::ui::MockUI;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn find_conflicts_ignores_case() {
        let found = find_conflicts(
            &ids(&["Tabnine.Tabnine-VSCode", "rust-lang.rust-analyzer"]),
            &ids(&["tabnine.tabnine-vscode"]),
        );
        assert_eq!(found, ids(&["Tabnine.Tabnine-VSCode"]));
    }

    #[test]
    fn no_conflicts_shows_nothing() {
        let mut host = MockHost::new().with_installed(&["rust-lang.rust-analyzer"]);
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        let config = UpdaterConfig::default();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let result = uninstall_conflicting_extensions(&mut ctx).unwrap();

        assert_eq!(result, ConflictResolution::NoConflicts);
        assert!(ui.notifications().is_empty());
    }

    #[test]
    fn declining_leaves_extensions() {
        let mut host = MockHost::new().with_installed(&["tabnine.tabnine-vscode"]);
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        let config = UpdaterConfig::default();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let result = uninstall_conflicting_extensions(&mut ctx).unwrap();

        assert_eq!(
            result,
            ConflictResolution::Declined {
                conflicts: ids(&["tabnine.tabnine-vscode"])
            }
        );
        assert!(host.executed().is_empty());
    }

    #[test]
    fn failed_uninstall_does_not_stop_others() {
        let mut host = MockHost::new()
            .with_installed(&["tabnine.tabnine-vscode", "tabnine.tabnine-vscode-enterprise"]);
        host.fail_for(UNINSTALL_EXTENSION_COMMAND, "tabnine.tabnine-vscode");
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        ui.set_notification_response(CONFLICT_NOTICE_ID, true);
        let config = UpdaterConfig::default();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        let result = uninstall_conflicting_extensions(&mut ctx).unwrap();

        assert_eq!(
            result,
            ConflictResolution::Uninstalled {
                removed: ids(&["tabnine.tabnine-vscode-enterprise"]),
                failed: ids(&["tabnine.tabnine-vscode"]),
            }
        );
        assert_eq!(host.executed_count(UNINSTALL_EXTENSION_COMMAND), 2);
        assert_eq!(host.executed_count(RELOAD_WINDOW_COMMAND), 1);
    }

    #[test]
    fn listing_failure_propagates() {
        let mut host = MockHost::new();
        host.fail_listing("no editor");
        let mut state = MemoryState::new();
        let mut ui = MockUI::new();
        let config = UpdaterConfig::default();

        let mut ctx = HostContext::new(&mut host, &mut state, &mut ui, &config);
        assert!(uninstall_conflicting_extensions(&mut ctx).is_err());
    }
}
