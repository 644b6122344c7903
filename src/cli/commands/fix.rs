//! Fix command implementation.
//!
//! The `wp-guardian fix` command activates the guardian and invokes the
//! manual fix command on one file.

use std::sync::Arc;

use crate::cli::args::FixArgs;
use crate::document::Document;
use crate::error::Result;
use crate::guardian::{activate, Guardian};
use crate::setup::TerminalLauncher;
use crate::triggers::{CommandRegistry, SaveEventBus, FIX_ALL_COMMAND};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The fix command implementation.
pub struct FixCommand<'a> {
    guardian: Arc<Guardian>,
    launcher: &'a dyn TerminalLauncher,
    args: FixArgs,
}

impl<'a> FixCommand<'a> {
    /// Create a new fix command.
    pub fn new(guardian: Arc<Guardian>, launcher: &'a dyn TerminalLauncher, args: FixArgs) -> Self {
        Self {
            guardian,
            launcher,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &FixArgs {
        &self.args
    }
}

impl Command for FixCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.file.is_file() {
            ui.error(&format!("No such file: {}", self.args.file.display()));
            return Ok(CommandResult::failure(1));
        }

        let document = Document::open(&self.args.file, self.args.language.as_deref());
        tracing::debug!(
            "Fixing {} as {}",
            document.path.display(),
            document.language
        );

        let registry = CommandRegistry::new();
        let saves = SaveEventBus::new();
        let mut activation = activate(
            Arc::clone(&self.guardian),
            &registry,
            &saves,
            ui,
            self.launcher,
        )?;

        // Installs accepted at activation should land before the fixers run.
        activation.wait_for_setup()?;

        registry.execute(FIX_ALL_COMMAND, Some(&document), ui)?;
        activation.deactivate()?;

        Ok(CommandResult::success())
    }
}
