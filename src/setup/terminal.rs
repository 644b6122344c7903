//! Visible terminal sessions for install commands.
//!
//! A [`Terminal`] receives text the way a user would type it. The shell
//! behind [`ShellTerminal`] shares the user's console for input and
//! output, so install tools can ask their own questions. Nothing checks
//! whether an install succeeded.

use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::error::{GuardianError, Result};
use crate::shell::{detect_shell, ShellInfo};

/// A terminal session that accepts typed input.
pub trait Terminal: Send {
    /// The terminal's title.
    fn name(&self) -> &str;

    /// Bring the terminal to the user's attention.
    fn show(&mut self) -> Result<()>;

    /// Submit one line of input.
    fn send_text(&mut self, text: &str) -> Result<()>;

    /// End input and let the session finish.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Creates terminals.
pub trait TerminalLauncher {
    /// Create a new terminal with the given title.
    fn create_terminal(&self, name: &str) -> Result<Box<dyn Terminal>>;
}

/// Launches [`ShellTerminal`]s running the user's shell.
#[derive(Debug, Clone, Default)]
pub struct ShellLauncher;

impl TerminalLauncher for ShellLauncher {
    fn create_terminal(&self, name: &str) -> Result<Box<dyn Terminal>> {
        Ok(Box::new(ShellTerminal::new(name, detect_shell())))
    }
}

/// The user's shell attached to the console.
///
/// Lines are collected as they are sent and run as one script on
/// [`Terminal::close`]. The shell inherits stdin, stdout and stderr, so a
/// prompt from `composer` or `npm` reaches the user. A terminal dropped
/// without closing runs nothing.
pub struct ShellTerminal {
    name: String,
    shell: ShellInfo,
    shown: bool,
    lines: Vec<String>,
}

impl ShellTerminal {
    /// A terminal that will run `shell` when closed.
    pub fn new(name: &str, shell: ShellInfo) -> Self {
        Self {
            name: name.to_string(),
            shell,
            shown: false,
            lines: Vec::new(),
        }
    }

    /// Lines sent so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Terminal for ShellTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn show(&mut self) -> Result<()> {
        self.shown = true;
        Ok(())
    }

    fn send_text(&mut self, text: &str) -> Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        if self.shown {
            println!("\n── {} ──", self.name);
        }

        let executable = self.shell.executable.display().to_string();
        let status = Command::new(&self.shell.executable)
            .args(self.shell.script_args())
            .arg(self.shell.script(&self.lines))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| GuardianError::SpawnFailed {
                command: executable.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Terminal '{}' ({}) exited with {}", self.name, executable, status);
        Ok(())
    }
}

/// Everything a recorded terminal was asked to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedTerminal {
    pub name: String,
    pub shown: bool,
    pub lines: Vec<String>,
    pub closed: bool,
}

/// Launcher that records terminals instead of starting shells.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    terminals: Arc<Mutex<Vec<RecordedTerminal>>>,
}

impl RecordingLauncher {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every terminal created so far.
    pub fn terminals(&self) -> Vec<RecordedTerminal> {
        self.terminals
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl TerminalLauncher for RecordingLauncher {
    fn create_terminal(&self, name: &str) -> Result<Box<dyn Terminal>> {
        let mut terminals = self
            .terminals
            .lock()
            .map_err(|_| anyhow::anyhow!("terminal recorder poisoned"))?;
        terminals.push(RecordedTerminal {
            name: name.to_string(),
            ..Default::default()
        });

        Ok(Box::new(RecordingTerminal {
            name: name.to_string(),
            index: terminals.len() - 1,
            terminals: Arc::clone(&self.terminals),
        }))
    }
}

struct RecordingTerminal {
    name: String,
    index: usize,
    terminals: Arc<Mutex<Vec<RecordedTerminal>>>,
}

impl RecordingTerminal {
    fn update(&self, f: impl FnOnce(&mut RecordedTerminal)) -> Result<()> {
        let mut terminals = self
            .terminals
            .lock()
            .map_err(|_| anyhow::anyhow!("terminal recorder poisoned"))?;
        if let Some(t) = terminals.get_mut(self.index) {
            f(t);
        }
        Ok(())
    }
}

impl Terminal for RecordingTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn show(&mut self) -> Result<()> {
        self.update(|t| t.shown = true)
    }

    fn send_text(&mut self, text: &str) -> Result<()> {
        self.update(|t| t.lines.push(text.to_string()))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.update(|t| t.closed = true)
    }
}
