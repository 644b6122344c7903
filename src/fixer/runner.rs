//! Asynchronous fixer execution.
//!
//! Submitting an invocation never blocks. The returned [`FixHandle`] can be
//! waited on, polled, or dropped; dropping it does not stop the fixer.
//! Nothing serialises runs against the same file.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Mutex;
use std::thread;

use crate::shell::{execute_program, CommandOptions};

use super::invocation::{FixInvocation, Tool};

/// How a fixer run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub tool: Tool,
    pub file: PathBuf,
    pub success: bool,
    /// Exit code, if the fixer ran and was not killed by a signal.
    pub exit_code: Option<i32>,
    /// What was logged on failure.
    pub message: Option<String>,
    /// Captured stdout followed by stderr, trimmed.
    pub output: String,
}

impl FixOutcome {
    fn succeeded(tool: Tool, file: PathBuf, output: String) -> Self {
        Self {
            tool,
            file,
            success: true,
            exit_code: Some(0),
            message: None,
            output,
        }
    }

    fn failed(tool: Tool, file: PathBuf, exit_code: Option<i32>, message: String) -> Self {
        Self {
            tool,
            file,
            success: false,
            exit_code,
            message: Some(message),
            output: String::new(),
        }
    }

    fn with_output(mut self, output: String) -> Self {
        self.output = output;
        self
    }
}

enum HandleState {
    Pending(Receiver<FixOutcome>),
    Done(FixOutcome),
}

/// Completion signal for a submitted fixer run.
pub struct FixHandle {
    tool: Tool,
    file: PathBuf,
    command_line: String,
    state: HandleState,
}

impl FixHandle {
    /// A handle for `invocation` that completes when the sender reports.
    pub fn pending(invocation: &FixInvocation, rx: Receiver<FixOutcome>) -> Self {
        Self::new(invocation, HandleState::Pending(rx))
    }

    /// A handle for `invocation` that is already complete.
    pub fn ready(invocation: &FixInvocation, outcome: FixOutcome) -> Self {
        Self::new(invocation, HandleState::Done(outcome))
    }

    fn new(invocation: &FixInvocation, state: HandleState) -> Self {
        Self {
            tool: invocation.tool,
            file: invocation.file.clone(),
            command_line: invocation.command_line(),
            state,
        }
    }

    /// The fixer this handle tracks.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The file being fixed.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The command as it was started.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Block until the run finishes.
    pub fn wait(self) -> FixOutcome {
        let Self {
            tool, file, state, ..
        } = self;
        match state {
            HandleState::Done(outcome) => outcome,
            HandleState::Pending(rx) => rx.recv().unwrap_or_else(|_| lost(tool, file)),
        }
    }

    /// The outcome, if the run has finished.
    pub fn try_outcome(&mut self) -> Option<FixOutcome> {
        if let HandleState::Pending(rx) = &self.state {
            let outcome = match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => lost(self.tool, self.file.clone()),
            };
            self.state = HandleState::Done(outcome);
        }

        match &self.state {
            HandleState::Done(outcome) => Some(outcome.clone()),
            HandleState::Pending(_) => None,
        }
    }
}

fn lost(tool: Tool, file: PathBuf) -> FixOutcome {
    FixOutcome::failed(
        tool,
        file,
        None,
        "fixer worker exited without reporting".to_string(),
    )
}

/// Runs fixer invocations without blocking the caller.
pub trait ProcessRunner: Send + Sync {
    /// Start the run and return its completion signal.
    fn submit(&self, invocation: FixInvocation) -> FixHandle;
}

/// Runs each invocation on its own thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRunner;

impl ProcessRunner for ThreadRunner {
    fn submit(&self, invocation: FixInvocation) -> FixHandle {
        let tool = invocation.tool;
        let file = invocation.file.clone();
        let (tx, rx) = mpsc::channel();

        tracing::info!("Running {}", invocation.command_line());

        let worker = invocation.clone();
        let spawned = thread::Builder::new()
            .name(format!("fix-{}", tool))
            .spawn(move || {
                let _ = tx.send(run_invocation(&worker));
            });

        match spawned {
            Ok(_) => FixHandle::pending(&invocation, rx),
            Err(e) => {
                let message = e.to_string();
                tool.log_failure(&file.display().to_string(), &message);
                FixHandle::ready(&invocation, FixOutcome::failed(tool, file, None, message))
            }
        }
    }
}

/// Run an invocation to completion on the current thread.
pub fn run_invocation(invocation: &FixInvocation) -> FixOutcome {
    let tool = invocation.tool;
    let file = invocation.file.clone();
    let options = CommandOptions {
        cwd: Some(invocation.cwd.clone()),
    };

    match execute_program(&invocation.program, &invocation.argv(), &options) {
        Ok(result) if result.success => {
            tracing::debug!(
                "{} finished on {} in {:?}",
                tool,
                file.display(),
                result.duration
            );
            FixOutcome::succeeded(tool, file, captured(&result.stdout, &result.stderr))
        }
        Ok(result) => {
            let detail = failure_detail(result.exit_code, &result.stdout, &result.stderr);
            tool.log_failure(&file.display().to_string(), &detail);
            FixOutcome::failed(tool, file, result.exit_code, detail)
                .with_output(captured(&result.stdout, &result.stderr))
        }
        Err(e) => {
            let detail = e.to_string();
            tool.log_failure(&file.display().to_string(), &detail);
            FixOutcome::failed(tool, file, None, detail)
        }
    }
}

fn captured(stdout: &str, stderr: &str) -> String {
    [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn failure_detail(exit_code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let status = match exit_code {
        Some(code) => format!("exited with code {}", code),
        None => "terminated by signal".to_string(),
    };

    let output = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };

    if output.is_empty() {
        status
    } else {
        format!("{}: {}", status, output)
    }
}

/// Runner that records invocations instead of running them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<FixInvocation>>,
    exit_code: i32,
}

impl RecordingRunner {
    /// A runner whose every run succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner whose every run exits with `exit_code`.
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Default::default()
        }
    }

    /// Every invocation submitted so far.
    pub fn invocations(&self) -> Vec<FixInvocation> {
        self.invocations
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl ProcessRunner for RecordingRunner {
    fn submit(&self, invocation: FixInvocation) -> FixHandle {
        let outcome = if self.exit_code == 0 {
            FixOutcome::succeeded(invocation.tool, invocation.file.clone(), String::new())
        } else {
            FixOutcome::failed(
                invocation.tool,
                invocation.file.clone(),
                Some(self.exit_code),
                format!("exited with code {}", self.exit_code),
            )
        };

        let handle = FixHandle::ready(&invocation, outcome);
        if let Ok(mut recorded) = self.invocations.lock() {
            recorded.push(invocation);
        }
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(program: &str, file: &str) -> FixInvocation {
        FixInvocation {
            tool: Tool::Eslint,
            program: PathBuf::from(program),
            args: vec!["--fix".to_string()],
            file: PathBuf::from(file),
            cwd: std::env::temp_dir(),
        }
    }

    #[test]
    fn ready_handle_returns_outcome() {
        let invocation = invocation("/proj/node_modules/.bin/eslint", "/proj/a.js");
        let outcome = FixOutcome::succeeded(Tool::Eslint, invocation.file.clone(), String::new());
        let mut handle = FixHandle::ready(&invocation, outcome.clone());
        assert_eq!(handle.tool(), Tool::Eslint);
        assert_eq!(
            handle.command_line(),
            "\"/proj/node_modules/.bin/eslint\" --fix \"/proj/a.js\""
        );
        assert_eq!(handle.try_outcome(), Some(outcome.clone()));
        assert_eq!(handle.wait(), outcome);
    }

    #[test]
    fn pending_handle_polls_then_completes() {
        let (tx, rx) = mpsc::channel();
        let invocation = invocation("/proj/node_modules/.bin/eslint", "/proj/a.js");
        let mut handle = FixHandle::pending(&invocation, rx);
        assert_eq!(handle.try_outcome(), None);

        let outcome = FixOutcome::succeeded(Tool::Eslint, PathBuf::from("/proj/a.js"), String::new());
        tx.send(outcome.clone()).unwrap();
        assert_eq!(handle.try_outcome(), Some(outcome.clone()));
        assert_eq!(handle.wait(), outcome);
    }

    #[test]
    fn dropped_sender_reports_failure() {
        let (tx, rx) = mpsc::channel::<FixOutcome>();
        drop(tx);
        let handle = FixHandle::pending(&invocation("/proj/node_modules/.bin/eslint", "/proj/a.js"), rx);
        let outcome = handle.wait();
        assert!(!outcome.success);
        assert!(outcome.message.unwrap().contains("without reporting"));
    }

    #[test]
    fn missing_binary_is_logged_failure_not_panic() {
        let outcome = ThreadRunner
            .submit(invocation("/nonexistent/node_modules/.bin/eslint", "/proj/a.js"))
            .wait();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, None);
        assert!(outcome.message.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn thread_runner_reports_exit_code() {
        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("fixer");
        std::fs::write(&script, "#!/bin/sh\necho 'cannot fix' >&2\nexit 2\n").unwrap();
        make_executable(&script);

        let outcome = ThreadRunner
            .submit(invocation(script.to_str().unwrap(), "/proj/a.js"))
            .wait();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(2));
        assert_eq!(
            outcome.message.as_deref(),
            Some("exited with code 2: cannot fix")
        );
    }

    #[cfg(unix)]
    #[test]
    fn thread_runner_passes_file_as_last_argument() {
        let temp = tempfile::TempDir::new().unwrap();
        let log = temp.path().join("args.log");
        let script = temp.path().join("fixer");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\nfor a in \"$@\"; do echo \"$a\" >> \"{}\"; done\n",
                log.display()
            ),
        )
        .unwrap();
        make_executable(&script);

        let outcome = ThreadRunner
            .submit(invocation(script.to_str().unwrap(), "/proj/My App.js"))
            .wait();

        assert!(outcome.success);
        assert_eq!(
            std::fs::read_to_string(&log).unwrap(),
            "--fix\n/proj/My App.js\n"
        );
    }

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn thread_runner_captures_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let script = temp.path().join("fixer");
        std::fs::write(&script, "#!/bin/sh\necho 'fixed 1 error'\necho 'deprecated rule' >&2\n").unwrap();
        make_executable(&script);

        let outcome = ThreadRunner
            .submit(invocation(script.to_str().unwrap(), "/proj/a.js"))
            .wait();

        assert!(outcome.success);
        assert_eq!(outcome.output, "fixed 1 error\ndeprecated rule");
    }

    #[test]
    fn captured_skips_empty_streams() {
        assert_eq!(captured("  out\n", ""), "out");
        assert_eq!(captured("", "err\n"), "err");
        assert_eq!(captured("", ""), "");
    }

    #[test]
    fn failure_detail_prefers_stderr() {
        assert_eq!(
            failure_detail(Some(1), "out", "err"),
            "exited with code 1: err"
        );
        assert_eq!(failure_detail(Some(1), "out", "  "), "exited with code 1: out");
        assert_eq!(failure_detail(None, "", ""), "terminated by signal");
    }

    #[test]
    fn recording_runner_records_and_completes() {
        let runner = RecordingRunner::exiting_with(1);
        let outcome = runner
            .submit(invocation("/proj/node_modules/.bin/eslint", "/proj/a.js"))
            .wait();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(runner.invocations().len(), 1);
    }
}
