//! Host implementation backed by the editor's command-line interface.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Result, UpdaterError};
use crate::ui::UserInterface;

use super::{
    config_key_for_setting, CommandRegistry, ExtensionHost, INSTALL_EXTENSION_COMMAND,
    OPEN_SETTINGS_COMMAND, RELOAD_WINDOW_COMMAND, UNINSTALL_EXTENSION_COMMAND,
};

/// Drives `code --install-extension` and friends.
///
/// Window reload and the settings surface have no CLI equivalent, so those
/// commands tell the user what to do instead.
#[derive(Debug)]
pub struct EditorCliHost {
    editor_cli: String,
    registry: CommandRegistry,
}

impl EditorCliHost {
    /// Build the host and register its commands.
    ///
    /// `config_path` is shown when the user is sent to the settings.
    pub fn new(editor_cli: impl Into<String>, config_path: Option<PathBuf>) -> Self {
        let editor_cli = editor_cli.into();
        let mut registry = CommandRegistry::new();

        let cli = editor_cli.clone();
        registry.register(INSTALL_EXTENSION_COMMAND, move |args, _ui| {
            let path = required_arg(INSTALL_EXTENSION_COMMAND, args)?;
            run_editor(
                &cli,
                INSTALL_EXTENSION_COMMAND,
                &["--install-extension", path, "--force"],
            )
            .map(|_| ())
        });

        let cli = editor_cli.clone();
        registry.register(UNINSTALL_EXTENSION_COMMAND, move |args, _ui| {
            let id = required_arg(UNINSTALL_EXTENSION_COMMAND, args)?;
            run_editor(
                &cli,
                UNINSTALL_EXTENSION_COMMAND,
                &["--uninstall-extension", id],
            )
            .map(|_| ())
        });

        registry.register(RELOAD_WINDOW_COMMAND, |_args, ui| {
            ui.message("Reload the editor window to apply the change.");
            Ok(())
        });

        registry.register(OPEN_SETTINGS_COMMAND, move |args, ui| {
            let location = config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "your updater config".to_string());
            match args.first().map(String::as_str) {
                Some(setting) => match config_key_for_setting(setting) {
                    Some(key) => ui.message(&format!(
                        "To change {}, set `{}` in {}",
                        setting, key, location
                    )),
                    None => ui.message(&format!("Open settings: {} in {}", setting, location)),
                },
                None => ui.message(&format!("Open settings: {}", location)),
            }
            Ok(())
        });

        Self {
            editor_cli,
            registry,
        }
    }

    pub fn editor_cli(&self) -> &str {
        &self.editor_cli
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}

impl ExtensionHost for EditorCliHost {
    fn execute_command(
        &mut self,
        name: &str,
        args: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        self.registry.execute(name, args, ui)
    }

    fn installed_extensions(&mut self) -> Result<Vec<String>> {
        let stdout = run_editor(&self.editor_cli, "list-extensions", &["--list-extensions"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

fn required_arg<'a>(command: &str, args: &'a [String]) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| UpdaterError::HostCommandFailed {
            name: command.to_string(),
            message: "missing argument".to_string(),
        })
}

/// Run the editor CLI and return its stdout.
fn run_editor(cli: &str, command: &str, args: &[&str]) -> Result<String> {
    tracing::debug!(cli, ?args, "Running editor CLI");

    let output = Command::new(cli)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| UpdaterError::HostCommandFailed {
            name: command.to_string(),
            message: format!("could not run '{}': {}", cli, e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("'{}' exited with {}", cli, output.status)
        } else {
            stderr
        };
        return Err(UpdaterError::HostCommandFailed {
            name: command.to_string(),
            message,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
