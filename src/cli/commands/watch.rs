//! Watch command implementation.
//!
//! The `wp-guardian watch` command activates the guardian and feeds every
//! file saved under the workspace to the save hook until interrupted.

use std::sync::Arc;

use crate::error::Result;
use crate::guardian::{activate, Guardian};
use crate::setup::TerminalLauncher;
use crate::triggers::{CommandRegistry, FsWatcher, SaveEventBus};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The watch command implementation.
pub struct WatchCommand<'a> {
    guardian: Arc<Guardian>,
    launcher: &'a dyn TerminalLauncher,
}

impl<'a> WatchCommand<'a> {
    /// Create a new watch command.
    pub fn new(guardian: Arc<Guardian>, launcher: &'a dyn TerminalLauncher) -> Self {
        Self { guardian, launcher }
    }
}

impl Command for WatchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = CommandRegistry::new();
        let saves = SaveEventBus::new();
        let mut activation = activate(
            Arc::clone(&self.guardian),
            &registry,
            &saves,
            ui,
            self.launcher,
        )?;
        activation.wait_for_setup()?;

        // Started after provisioning so freshly written configs are not
        // reported as saves.
        let watcher = FsWatcher::start(self.guardian.workspace(), &self.guardian.config().watch)?;
        ui.message("Watching for saves. Press Ctrl-C to stop.");

        let outcome = watcher.run(&saves);
        activation.deactivate()?;
        outcome.map(|()| CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuardianConfig;
    use crate::fixer::RecordingRunner;
    use crate::setup::RecordingLauncher;
    use crate::ui::MockUI;
    use crate::workspace::Workspace;
    use crate::GuardianError;

    #[test]
    fn empty_workspace_cannot_be_watched() {
        let guardian = Arc::new(Guardian::new(
            Workspace::empty(),
            GuardianConfig::default(),
            Arc::new(RecordingRunner::new()),
        ));
        let launcher = RecordingLauncher::new();
        let mut ui = MockUI::new();

        let result = WatchCommand::new(guardian, &launcher).execute(&mut ui);

        assert!(matches!(result, Err(GuardianError::WatchFailed { .. })));
    }
}
