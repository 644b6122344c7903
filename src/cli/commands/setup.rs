//! Setup command implementation.
//!
//! The `wp-guardian setup` command provisions the workspace without
//! registering any trigger.

use std::sync::Arc;

use crate::error::Result;
use crate::guardian::Guardian;
use crate::setup::TerminalLauncher;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The setup command implementation.
pub struct SetupCommand<'a> {
    guardian: Arc<Guardian>,
    launcher: &'a dyn TerminalLauncher,
}

impl<'a> SetupCommand<'a> {
    /// Create a new setup command.
    pub fn new(guardian: Arc<Guardian>, launcher: &'a dyn TerminalLauncher) -> Self {
        Self { guardian, launcher }
    }
}

impl Command for SetupCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.guardian.workspace().is_empty() {
            ui.warning("No project found, nothing to set up.");
            return Ok(CommandResult::success());
        }

        let report = self.guardian.ensure_dependencies(ui, self.launcher)?;

        if report.is_noop() {
            ui.success("Workspace already set up");
        } else {
            for dependency in &report.missing {
                let launched = report
                    .launched
                    .iter()
                    .any(|l| l.dependency.key == dependency.key);
                if !launched {
                    ui.warning(&format!(
                        "Skipped install, {} is still missing",
                        dependency.binary
                    ));
                }
            }
        }

        report.wait()?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuardianConfig;
    use crate::fixer::RecordingRunner;
    use crate::setup::{RecordingLauncher, SETUP_TERMINAL_NAME};
    use crate::ui::MockUI;
    use crate::workspace::Workspace;
    use tempfile::TempDir;

    fn guardian(workspace: Workspace) -> Arc<Guardian> {
        Arc::new(Guardian::new(
            workspace,
            GuardianConfig::default(),
            Arc::new(RecordingRunner::new()),
        ))
    }

    #[test]
    fn declined_installs_are_reported() {
        let temp = TempDir::new().unwrap();
        let launcher = RecordingLauncher::new();
        let mut ui = MockUI::new();

        let cmd = SetupCommand::new(guardian(Workspace::new([temp.path().to_path_buf()])), &launcher);
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(temp.path().join("phpcs.xml").exists());
        assert!(temp.path().join(".eslintrc.json").exists());
        assert!(ui.has_warning("Skipped install, vendor/bin/phpcs is still missing"));
        assert!(launcher.terminals().is_empty());
    }

    #[test]
    fn accepted_install_terminal_is_closed() {
        let temp = TempDir::new().unwrap();
        let launcher = RecordingLauncher::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_eslint", true);

        let cmd = SetupCommand::new(guardian(Workspace::new([temp.path().to_path_buf()])), &launcher);
        cmd.execute(&mut ui).unwrap();

        let terminals = launcher.terminals();
        assert_eq!(terminals.len(), 1);
        assert_eq!(terminals[0].name, SETUP_TERMINAL_NAME);
        assert!(terminals[0].closed);
    }

    #[test]
    fn second_run_is_already_set_up() {
        let temp = TempDir::new().unwrap();
        for binary in ["vendor/bin/phpcs", "node_modules/.bin/eslint"] {
            let path = temp.path().join(binary);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }
        let launcher = RecordingLauncher::new();
        let g = guardian(Workspace::new([temp.path().to_path_buf()]));

        SetupCommand::new(Arc::clone(&g), &launcher)
            .execute(&mut MockUI::new())
            .unwrap();
        let mut ui = MockUI::new();
        SetupCommand::new(g, &launcher).execute(&mut ui).unwrap();

        assert!(ui.has_success("Workspace already set up"));
    }

    #[test]
    fn no_project_is_a_warning_not_an_error() {
        let launcher = RecordingLauncher::new();
        let mut ui = MockUI::new();

        let result = SetupCommand::new(guardian(Workspace::empty()), &launcher)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No project found, nothing to set up."));
    }
}
