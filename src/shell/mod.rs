//! Process execution and shell detection.

pub mod command;
pub mod platform;

pub use command::{execute_program, CommandOptions, CommandResult};
pub use platform::{detect_shell, is_ci, ShellInfo, ShellType};
