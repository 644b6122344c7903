//! Dependency and config provisioning.
//!
//! Runs once at activation. Config files are written only where nothing
//! exists yet; missing tools are offered for install and, on consent, the
//! install command is typed into a fresh terminal. Nothing waits for or
//! verifies the install.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SetupSettings;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};
use crate::workspace::{Workspace, ESLINT_BIN, PHPCS_BIN};

use super::templates::CONFIG_TEMPLATES;
use super::terminal::{Terminal, TerminalLauncher};

/// Title of terminals opened for installs.
pub const SETUP_TERMINAL_NAME: &str = "WP Guardian Setup";

/// A tool the fixers depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Prompt key, also used for `WP_GUARDIAN_PROMPT_<KEY>`.
    pub key: &'static str,
    /// Binary whose presence means the tool is installed.
    pub binary: &'static str,
    /// Question asked when the binary is missing.
    pub question: &'static str,
    /// Command typed into the terminal on consent.
    pub install_command: &'static str,
}

/// The PHP coding standards and the ESLint plugins, in prompt order.
pub const DEPENDENCIES: [Dependency; 2] = [
    Dependency {
        key: "install_phpcs",
        binary: PHPCS_BIN,
        question: "WPCS (PHPCS) is missing. Install WordPress standards?",
        install_command: r#"composer require --dev wp-coding-standards/wpcs="^3.0""#,
    },
    Dependency {
        key: "install_eslint",
        binary: ESLINT_BIN,
        question: "ESLint (WordPress & React) is missing. Install now?",
        install_command: "npm install @wordpress/eslint-plugin eslint-plugin-react --save-dev",
    },
];

impl Dependency {
    /// Whether the binary exists under `root`.
    pub fn is_installed(&self, root: &Path) -> bool {
        root.join(self.binary).exists()
    }
}

/// An install the user agreed to.
pub struct LaunchedInstall {
    pub dependency: Dependency,
    pub terminal: Box<dyn Terminal>,
}

/// What the ensurer did.
#[derive(Default)]
pub struct SetupReport {
    /// Workspace root used, if any.
    pub root: Option<PathBuf>,
    /// Config files created by this run.
    pub configs_written: Vec<PathBuf>,
    /// Dependencies whose binary was absent.
    pub missing: Vec<Dependency>,
    /// Installs started in a terminal.
    pub launched: Vec<LaunchedInstall>,
}

impl SetupReport {
    /// Whether anything at all happened.
    pub fn is_noop(&self) -> bool {
        self.configs_written.is_empty() && self.missing.is_empty()
    }

    /// Close every install terminal, letting each run to the end.
    pub fn wait(self) -> Result<()> {
        for install in self.launched {
            install.terminal.close()?;
        }
        Ok(())
    }
}

/// Provision configs and offer missing tools.
///
/// A workspace with no folders is a silent no-op.
pub fn ensure_dependencies(
    workspace: &Workspace,
    settings: &SetupSettings,
    ui: &mut dyn UserInterface,
    launcher: &dyn TerminalLauncher,
) -> Result<SetupReport> {
    let Some(root) = workspace.root() else {
        tracing::debug!("No workspace open, skipping setup");
        return Ok(SetupReport::default());
    };

    let mut report = SetupReport {
        root: Some(root.to_path_buf()),
        ..Default::default()
    };

    if settings.write_configs {
        report.configs_written = ensure_config_files(root)?;
        for path in &report.configs_written {
            ui.message(&format!("Created {}", path.display()));
        }
    }

    if !settings.check_tools {
        return Ok(report);
    }

    for dependency in DEPENDENCIES {
        if dependency.is_installed(root) {
            tracing::debug!("{} present", dependency.binary);
            continue;
        }

        tracing::info!("{} not found under {}", dependency.binary, root.display());
        report.missing.push(dependency);

        let prompt = Prompt::new(dependency.key, dependency.question);
        if ui.confirm(&prompt)? {
            let terminal = run_terminal_command(launcher, dependency.install_command, root)?;
            report.launched.push(LaunchedInstall {
                dependency,
                terminal,
            });
        }
    }

    Ok(report)
}

/// Write each config template whose target path is free.
///
/// Returns the paths that were written. An existing file is never
/// touched; creation uses `create_new` so a concurrent writer cannot be
/// clobbered either.
pub fn ensure_config_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for template in CONFIG_TEMPLATES {
        let path = root.join(template.file_name);
        if path.exists() {
            continue;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        };
        file.write_all(template.contents()?.as_bytes())?;

        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Open a fresh terminal, change into `cwd`, and type `command`.
pub fn run_terminal_command(
    launcher: &dyn TerminalLauncher,
    command: &str,
    cwd: &Path,
) -> Result<Box<dyn Terminal>> {
    let mut terminal = launcher.create_terminal(SETUP_TERMINAL_NAME)?;
    terminal.show()?;
    terminal.send_text(&format!("cd \"{}\"", cwd.display()))?;
    terminal.send_text(command)?;
    Ok(terminal)
}
