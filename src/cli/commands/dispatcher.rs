//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::fixer::{ProcessRunner, ThreadRunner};
use crate::guardian::Guardian;
use crate::setup::{ShellLauncher, TerminalLauncher};
use crate::ui::UserInterface;
use crate::workspace::Workspace;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit status for the process; codes outside `0..=255` become 1.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    workspace: Workspace,
    runner: Arc<dyn ProcessRunner>,
    launcher: Box<dyn TerminalLauncher>,
}

impl CommandDispatcher {
    /// Create a dispatcher that runs real fixers and real shells.
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            runner: Arc::new(ThreadRunner),
            launcher: Box::new(ShellLauncher),
        }
    }

    /// Replace the fixer runner.
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the terminal launcher used for installs.
    pub fn with_launcher(mut self, launcher: Box<dyn TerminalLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Get the workspace.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Dispatch and execute a command.
    ///
    /// Settings are loaded before any command other than `completions`
    /// runs, so a broken `.wp-guardian.yml` fails every command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            let cmd = super::completions::CompletionsCommand::new(args.clone());
            return cmd.execute(ui);
        }

        let guardian = Arc::new(Guardian::load(
            self.workspace.clone(),
            Arc::clone(&self.runner),
        )?);
        let launcher = self.launcher.as_ref();

        match &cli.command {
            Commands::Setup => {
                let cmd = super::setup::SetupCommand::new(guardian, launcher);
                cmd.execute(ui)
            }
            Commands::Fix(args) => {
                let cmd = super::fix::FixCommand::new(guardian, launcher, args.clone());
                cmd.execute(ui)
            }
            Commands::Watch => {
                let cmd = super::watch::WatchCommand::new(guardian, launcher);
                cmd.execute(ui)
            }
            Commands::Completions(_) => Ok(CommandResult::success()),
        }
    }
}
