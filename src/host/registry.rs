//! Name-to-handler mapping for host commands.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, UpdaterError};
use crate::ui::UserInterface;

/// Handler invoked with the command arguments.
pub type CommandHandler = Box<dyn FnMut(&[String], &mut dyn UserInterface) -> Result<()>>;

/// Command registry built once at startup.
///
/// Each command is added by its own [`register`](Self::register) call.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, CommandHandler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[String], &mut dyn UserInterface) -> Result<()> + 'static,
    {
        let name = name.into();
        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            tracing::warn!(command = %name, "Replaced existing command handler");
        }
    }

    /// Dispatch `name` to its handler.
    pub fn execute(
        &mut self,
        name: &str,
        args: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let handler = self
            .handlers
            .get_mut(name)
            .ok_or_else(|| UpdaterError::UnknownCommand {
                name: name.to_string(),
            })?;
        tracing::debug!(command = name, ?args, "Executing host command");
        handler(args, ui)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatches_to_registered_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut registry = CommandRegistry::new();
        registry.register("echo", move |args, _ui| {
            sink.borrow_mut().extend(args.iter().cloned());
            Ok(())
        });

        let mut ui = MockUI::new();
        registry
            .execute("echo", &["a".to_string(), "b".to_string()], &mut ui)
            .unwrap();

        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unknown_command_is_error() {
        let mut registry = CommandRegistry::new();
        let mut ui = MockUI::new();

        let result = registry.execute("missing", &[], &mut ui);
        assert!(matches!(
            result,
            Err(UpdaterError::UnknownCommand { name }) if name == "missing"
        ));
    }

    #[test]
    fn handler_can_use_ui() {
        let mut registry = CommandRegistry::new();
        registry.register("hello", |_args, ui| {
            ui.message("hello from handler");
            Ok(())
        });

        let mut ui = MockUI::new();
        registry.execute("hello", &[], &mut ui).unwrap();
        assert!(ui.has_message("hello from handler"));
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = CommandRegistry::new();
        registry.register("cmd", |_, _| Ok(()));
        registry.register("cmd", |_, _| {
            Err(UpdaterError::HostCommandFailed {
                name: "cmd".to_string(),
                message: "second".to_string(),
            })
        });

        let mut ui = MockUI::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.execute("cmd", &[], &mut ui).is_err());
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register("b", |_, _| Ok(()));
        registry.register("a", |_, _| Ok(()));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(!registry.is_empty());
        assert!(format!("{:?}", registry).contains("\"a\""));
    }
}
