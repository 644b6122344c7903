//! Configuration schema definitions.
//!
//! These structs map to `.wp-guardian.yml`. Every field has a default so
//! an absent or partial file behaves like the built-in behaviour.

use serde::Deserialize;

/// Root configuration structure for `.wp-guardian.yml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuardianConfig {
    /// PHP style-fixer settings
    pub php: PhpSettings,

    /// JavaScript linter settings
    pub javascript: JavaScriptSettings,

    /// Dependency and config provisioning
    pub setup: SetupSettings,

    /// Save watcher settings
    pub watch: WatchSettings,
}

/// Settings for the `phpcbf` branch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhpSettings {
    /// Run the fixer on PHP documents
    pub enabled: bool,

    /// Value passed as `--standard=`
    pub standard: String,
}

impl Default for PhpSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            standard: default_standard(),
        }
    }
}

fn default_standard() -> String {
    "WordPress".to_string()
}

/// Settings for the `eslint --fix` branch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JavaScriptSettings {
    /// Run the linter on JS/JSX/TSX documents
    pub enabled: bool,
}

impl Default for JavaScriptSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Settings for the startup ensurer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SetupSettings {
    /// Write `phpcs.xml` and `.eslintrc.json` when absent
    pub write_configs: bool,

    /// Offer to install missing tool binaries
    pub check_tools: bool,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            write_configs: true,
            check_tools: true,
        }
    }
}

/// Settings for the filesystem save watcher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Directory names whose contents never count as saves
    pub ignore: Vec<String>,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            ignore: vec![
                "vendor".to_string(),
                "node_modules".to_string(),
                ".git".to_string(),
            ],
        }
    }
}
