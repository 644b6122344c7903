//! The activation context.
//!
//! A [`Guardian`] is built once per process and shared with every
//! registered handler. [`activate`] provisions the workspace and wires the
//! manual command and the save hook to the fixers.

use std::sync::Arc;

use crate::config::{load_config, GuardianConfig};
use crate::document::Document;
use crate::error::Result;
use crate::fixer::{plan, FixHandle, FixOutcome, ProcessRunner};
use crate::setup::{self, SetupReport, TerminalLauncher};
use crate::triggers::{CommandRegistry, SaveEventBus, Subscription, FIX_ALL_COMMAND};
use crate::ui::UserInterface;
use crate::workspace::Workspace;

/// Status shown after the manual command finishes.
pub const FILE_FIXED_MESSAGE: &str = "WP Guardian: File Fixed!";

/// Workspace, settings and runner shared by every trigger.
pub struct Guardian {
    workspace: Workspace,
    config: GuardianConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl Guardian {
    pub fn new(workspace: Workspace, config: GuardianConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            workspace,
            config,
            runner,
        }
    }

    /// Build a guardian with settings read from the workspace root.
    pub fn load(workspace: Workspace, runner: Arc<dyn ProcessRunner>) -> Result<Self> {
        let config = load_config(&workspace)?;
        Ok(Self::new(workspace, config, runner))
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &GuardianConfig {
        &self.config
    }

    /// Write missing config files and offer to install missing tools.
    pub fn ensure_dependencies(
        &self,
        ui: &mut dyn UserInterface,
        launcher: &dyn TerminalLauncher,
    ) -> Result<SetupReport> {
        setup::ensure_dependencies(&self.workspace, &self.config.setup, ui, launcher)
    }

    /// Start every fixer that applies to `document`.
    ///
    /// Returns immediately; the handles may be waited on or dropped.
    pub fn run_fixer(&self, document: &Document) -> Vec<FixHandle> {
        plan(document, &self.workspace, &self.config)
            .into_iter()
            .map(|invocation| self.runner.submit(invocation))
            .collect()
    }
}

/// Registrations made by [`activate`].
pub struct Activation {
    subscriptions: Vec<Subscription>,
    setup: SetupReport,
}

impl Activation {
    /// What provisioning did at activation.
    pub fn setup(&self) -> &SetupReport {
        &self.setup
    }

    /// Labels of the live registrations.
    pub fn registrations(&self) -> Vec<&str> {
        self.subscriptions.iter().map(|s| s.label()).collect()
    }

    /// Let any install terminals finish.
    pub fn wait_for_setup(&mut self) -> Result<()> {
        std::mem::take(&mut self.setup).wait()
    }

    /// Remove every registration and close the install terminals.
    pub fn deactivate(mut self) -> Result<()> {
        for subscription in &mut self.subscriptions {
            subscription.dispose();
        }
        self.wait_for_setup()
    }
}

/// Provision the workspace and register both triggers.
///
/// The manual command fixes the active document, waits for the fixers, and
/// reports [`FILE_FIXED_MESSAGE`]. The save hook starts the fixers and
/// returns without waiting.
pub fn activate(
    guardian: Arc<Guardian>,
    registry: &CommandRegistry,
    saves: &SaveEventBus,
    ui: &mut dyn UserInterface,
    launcher: &dyn TerminalLauncher,
) -> Result<Activation> {
    tracing::info!("WP Code Guardian is active.");

    let setup = guardian.ensure_dependencies(ui, launcher)?;

    let manual = Arc::clone(&guardian);
    let command = registry.register(FIX_ALL_COMMAND, move |active, ui| {
        let Some(document) = active else {
            return Ok(());
        };

        let handles = manual.run_fixer(document);
        if !handles.is_empty() {
            let mut spinner = ui.start_spinner(&format!("Fixing {}", document.path.display()));
            // Failures were already logged by the runner.
            let finished: Vec<(String, FixOutcome)> = handles
                .into_iter()
                .map(|handle| (handle.command_line().to_string(), handle.wait()))
                .collect();
            spinner.finish_success("Fixers finished");

            for (command_line, outcome) in &finished {
                ui.command_output(command_line, &outcome.output);
            }
        }

        ui.success(FILE_FIXED_MESSAGE);
        Ok(())
    })?;

    let on_save = Arc::clone(&guardian);
    let save = saves.subscribe(move |document| {
        let _ = on_save.run_fixer(document);
    });

    Ok(Activation {
        subscriptions: vec![command, save],
        setup,
    })
}
