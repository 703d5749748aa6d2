//! Services provided by the editor host.
//!
//! Everything the updater needs from the editor goes through an explicit
//! [`HostContext`] passed into each operation:
//! - [`ExtensionHost`] executes named commands and lists installed extensions
//! - [`GlobalState`] persists values across runs
//! - [`UserInterface`] shows notifications and prompts
//!
//! [`EditorCliHost`] implements the host on top of the editor's command-line
//! interface. [`MockHost`] records calls for tests.

pub mod editor_cli;
pub mod mock;
pub mod registry;

pub use editor_cli::EditorCliHost;
pub use mock::MockHost;
pub use registry::{CommandHandler, CommandRegistry};

use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::state::GlobalState;
use crate::ui::UserInterface;
use crate::updates::CancellationToken;

/// Installs a packaged extension from a local path.
pub const INSTALL_EXTENSION_COMMAND: &str = "workbench.extensions.installExtension";

/// Uninstalls an extension by id.
pub const UNINSTALL_EXTENSION_COMMAND: &str = "workbench.extensions.uninstallExtension";

/// Reloads the editor window.
pub const RELOAD_WINDOW_COMMAND: &str = "workbench.action.reloadWindow";

/// Opens the settings surface, optionally focused on a setting key.
pub const OPEN_SETTINGS_COMMAND: &str = "workbench.action.openSettings";

/// Setting that opts the user into beta channel updates.
pub const BETA_CHANNEL_SETTING: &str = "tabnine.receiveBetaChannelUpdates";

/// Setting holding the enterprise server URL.
pub const SERVER_URL_SETTING: &str = "tabnine.cloudHost";

/// Config file key backing an editor setting.
pub fn config_key_for_setting(setting: &str) -> Option<&'static str> {
    match setting {
        BETA_CHANNEL_SETTING => Some("channel.beta_channel_enabled"),
        SERVER_URL_SETTING => Some("enterprise.server_url"),
        _ => None,
    }
}

/// Command execution and extension inventory of the editor host.
pub trait ExtensionHost {
    /// Execute a host command by name.
    fn execute_command(
        &mut self,
        name: &str,
        args: &[String],
        ui: &mut dyn UserInterface,
    ) -> Result<()>;

    /// Ids of the installed extensions.
    fn installed_extensions(&mut self) -> Result<Vec<String>>;
}

/// Host services for one activation.
pub struct HostContext<'a> {
    pub host: &'a mut dyn ExtensionHost,
    pub state: &'a mut dyn GlobalState,
    pub ui: &'a mut dyn UserInterface,
    pub config: &'a UpdaterConfig,
    pub cancel: CancellationToken,
}

impl<'a> HostContext<'a> {
    pub fn new(
        host: &'a mut dyn ExtensionHost,
        state: &'a mut dyn GlobalState,
        ui: &'a mut dyn UserInterface,
        config: &'a UpdaterConfig,
    ) -> Self {
        Self {
            host,
            state,
            ui,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute a host command with this context's UI.
    pub fn execute(&mut self, name: &str, args: &[String]) -> Result<()> {
        self.host.execute_command(name, args, &mut *self.ui)
    }
}
