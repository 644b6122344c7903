//! Fixer invocations.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// An external fixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// PHP Code Beautifier and Fixer.
    Phpcbf,
    /// ESLint in `--fix` mode.
    Eslint,
}

impl Tool {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phpcbf => "phpcbf",
            Self::Eslint => "eslint",
        }
    }

    /// Log a failed run.
    ///
    /// phpcbf exits non-zero whenever violations remain that it cannot
    /// fix, so its failures are routine and logged as warnings.
    pub fn log_failure(&self, file: &str, detail: &str) {
        match self {
            Self::Phpcbf => {
                tracing::warn!(file, detail, "PHPCS: Manual fixes required.");
            }
            Self::Eslint => {
                tracing::error!(file, error = detail, "ESLint fix failed");
            }
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One fixer run against one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixInvocation {
    pub tool: Tool,
    /// Absolute path of the workspace-local binary.
    pub program: PathBuf,
    /// Flags placed before the file.
    pub args: Vec<String>,
    /// The document being fixed.
    pub file: PathBuf,
    /// Workspace folder the fixer runs in.
    pub cwd: PathBuf,
}

impl FixInvocation {
    /// Full argument vector: flags, then the file.
    pub fn argv(&self) -> Vec<OsString> {
        self.args
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(self.file.clone().into_os_string()))
            .collect()
    }

    /// The command as a shell would show it, program and file quoted.
    pub fn command_line(&self) -> String {
        let mut line = format!("\"{}\"", self.program.display());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(&format!(" \"{}\"", self.file.display()));
        line
    }
}
