//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress, status, and each fixer's command line and output.
    Verbose,
    /// Progress and status.
    #[default]
    Normal,
    /// Final status, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode echoes fixer commands and their output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows spinners and progress messages.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
