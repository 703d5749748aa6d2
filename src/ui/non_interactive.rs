//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::UpdaterTheme;
use super::{Notification, OutputMode, Prompt, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts without a terminal.
pub const PROMPT_ENV_PREFIX: &str = "PRERELEASE_UPDATER_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts resolve to their default unless a `PRERELEASE_UPDATER_PROMPT_<KEY>`
/// override is set. Notifications are printed and never pressed.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: UpdaterTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: UpdaterTheme::plain(),
            env_overrides: overrides,
        }
    }

    fn override_for(&self, key: &str) -> Option<bool> {
        let env_key = format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            key.to_uppercase().replace(['-', '.'], "_")
        );
        self.env_overrides
            .get(&env_key)
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "yes" | "y" | "1"))
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        Ok(self.override_for(&prompt.key).unwrap_or(prompt.default))
    }

    fn notify(&mut self, notification: &Notification) -> Result<bool> {
        if self.mode.shows_status() {
            println!(
                "{}",
                self.theme
                    .format_notification(&notification.text, &notification.button)
            );
        }
        Ok(self.override_for(&notification.id).unwrap_or(false))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            mode: self.mode,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints one line when the operation ends.
struct LineSpinner {
    mode: OutputMode,
    theme: UpdaterTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }
}
