//! Recording host for tests.

use crate::error::{Result, UpdaterError};
use crate::ui::UserInterface;

use super::ExtensionHost;

/// Host that records every command and fails on request.
#[derive(Debug, Default)]
pub struct MockHost {
    executed: Vec<(String, Vec<String>)>,
    failures: Vec<(String, Option<String>)>,
    installed: Vec<String>,
    list_error: Option<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report these extension ids as installed.
    pub fn with_installed(mut self, ids: &[&str]) -> Self {
        self.installed = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Make every call of `name` fail.
    pub fn fail(&mut self, name: &str) {
        self.failures.push((name.to_string(), None));
    }

    /// Make `name` fail only when its first argument is `arg`.
    pub fn fail_for(&mut self, name: &str, arg: &str) {
        self.failures
            .push((name.to_string(), Some(arg.to_string())));
    }

    /// Make listing installed extensions fail.
    pub fn fail_listing(&mut self, message: &str) {
        self.list_error = Some(message.to_string());
    }

    /// Every command executed, in order, including failed ones.
    pub fn executed(&self) -> &[(String, Vec<String>)] {
        &self.executed
    }

    pub fn executed_count(&self, name: &str) -> usize {
        self.executed.iter().filter(|(n, _)| n == name).count()
    }

    /// Arguments of every call of `name`.
    pub fn args_for(&self, name: &str) -> Vec<&[String]> {
        self.executed
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, args)| args.as_slice())
            .collect()
    }

    fn should_fail(&self, name: &str, args: &[String]) -> bool {
        self.failures.iter().any(|(n, arg)| {
            n == name
                && match arg {
                    None => true,
                    Some(arg) => args.first() == Some(arg),
                }
        })
    }
}

impl ExtensionHost for MockHost {
    fn execute_command(
        &mut self,
        name: &str,
        args: &[String],
        _ui: &mut dyn UserInterface,
    ) -> Result<()> {
        self.executed.push((name.to_string(), args.to_vec()));
        if self.should_fail(name, args) {
            return Err(UpdaterError::HostCommandFailed {
                name: name.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn installed_extensions(&mut self) -> Result<Vec<String>> {
        match &self.list_error {
            Some(message) => Err(UpdaterError::HostCommandFailed {
                name: "list-extensions".to_string(),
                message: message.clone(),
            }),
            None => Ok(self.installed.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn records_commands() {
        let mut host = MockHost::new();
        let mut ui = MockUI::new();

        host.execute_command("a", &["1".to_string()], &mut ui).unwrap();
        host.execute_command("a", &[], &mut ui).unwrap();

        assert_eq!(host.executed_count("a"), 2);
        assert_eq!(host.args_for("a")[0], &["1".to_string()]);
    }

    #[test]
    fn fail_for_matches_first_argument() {
        let mut host = MockHost::new();
        host.fail_for("uninstall", "bad");
        let mut ui = MockUI::new();

        assert!(host
            .execute_command("uninstall", &["bad".to_string()], &mut ui)
            .is_err());
        assert!(host
            .execute_command("uninstall", &["good".to_string()], &mut ui)
            .is_ok());
        assert_eq!(host.executed().len(), 2);
    }

    #[test]
    fn installed_and_listing_failure() {
        let mut host = MockHost::new().with_installed(&["x.y"]);
        assert_eq!(host.installed_extensions().unwrap(), vec!["x.y"]);

        host.fail_listing("boom");
        assert!(host.installed_extensions().is_err());
    }
}
