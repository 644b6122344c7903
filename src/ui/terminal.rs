//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_confirm, should_use_colors, GuardianTheme, NonInteractiveUI, OutputMode,
    ProgressSpinner, Prompt, SpinnerHandle, UserInterface,
};

/// Styled console output with dialoguer prompts and indicatif spinners.
pub struct TerminalUI {
    term: Term,
    theme: GuardianTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            GuardianTheme::new()
        } else {
            GuardianTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }

    fn line(&self, text: &str) {
        writeln!(&self.term, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            self.line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        self.line(&self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        self.line(&self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        self.line(&self.theme.format_error(msg));
    }

    fn command_output(&mut self, command_line: &str, output: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        self.line(&self.theme.format_command(command_line));
        if !output.is_empty() {
            self.line(&self.theme.format_output(output));
        }
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        prompt_confirm(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}

/// Pick the UI for this run.
///
/// Prompts need a terminal on stdout; anything else gets
/// [`NonInteractiveUI`].
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
