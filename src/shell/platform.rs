//! Platform-specific shell detection.

use std::path::PathBuf;

/// Information about the user's shell.
#[derive(Debug, Clone)]
pub struct ShellInfo {
    /// Shell executable path.
    pub executable: PathBuf,

    /// Shell name (bash, zsh, fish, powershell, cmd).
    pub name: ShellType,
}

impl ShellInfo {
    /// Arguments that precede a script passed on the command line.
    ///
    /// POSIX shells run as login shells so that version managers
    /// (nvm, asdf, phpenv) put `npm` and `composer` on PATH.
    pub fn script_args(&self) -> &'static [&'static str] {
        match self.name {
            ShellType::Bash | ShellType::Zsh | ShellType::Fish => &["-l", "-c"],
            ShellType::PowerShell => &["-NoLogo", "-Command"],
            ShellType::Cmd => &["/C"],
            ShellType::Unknown => &["-c"],
        }
    }

    /// Join typed lines into one script for this shell.
    pub fn script(&self, lines: &[String]) -> String {
        let separator = match self.name {
            ShellType::Cmd => " & ",
            ShellType::PowerShell => "; ",
            _ => "\n",
        };
        lines.join(separator)
    }
}

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = std::path::Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }
}

/// Detect the current shell environment.
pub fn detect_shell() -> ShellInfo {
    let executable = get_shell_executable();
    let name = ShellType::from_executable(&executable.to_string_lossy());

    ShellInfo { executable, name }
}

fn get_shell_executable() -> PathBuf {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cmd.exe"))
    } else {
        std::env::var("SHELL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/bin/sh"))
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive prompts in `main()`. Checks `CI`,
/// `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
