//! Dependency and config provisioning.
//!
//! - [`ensurer`] - config files and tool checks run at activation
//! - [`templates`] - the embedded `phpcs.xml` and `.eslintrc.json`
//! - [`terminal`] - terminals that install commands are typed into

pub mod ensurer;
pub mod templates;
pub mod terminal;

pub use ensurer::{
    ensure_config_files, ensure_dependencies, run_terminal_command, Dependency, LaunchedInstall,
    SetupReport, DEPENDENCIES, SETUP_TERMINAL_NAME,
};
pub use templates::{ConfigTemplate, CONFIG_TEMPLATES};
pub use terminal::{
    RecordedTerminal, RecordingLauncher, ShellLauncher, ShellTerminal, Terminal, TerminalLauncher,
};
