//! Configuration file discovery and loading.

use crate::config::schema::GuardianConfig;
use crate::error::{GuardianError, Result};
use crate::workspace::{Workspace, GUARDIAN_CONFIG};
use std::fs;
use std::path::Path;

/// Load the config for a workspace.
///
/// Reads `.wp-guardian.yml` from the workspace root. No workspace or no
/// file yields the defaults.
pub fn load_config(workspace: &Workspace) -> Result<GuardianConfig> {
    match workspace.root() {
        Some(root) => load_config_file(&root.join(GUARDIAN_CONFIG)),
        None => Ok(GuardianConfig::default()),
    }
}

/// Load a single config file, falling back to defaults if it is absent.
///
/// # Errors
///
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<GuardianConfig> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(GuardianConfig::default());
        }
        Err(e) => return Err(GuardianError::Io(e)),
    };

    parse_config(&content, path)
}

/// Parse YAML content into a config.
///
/// An empty document is treated as all defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GuardianConfig> {
    if content.trim().is_empty() {
        return Ok(GuardianConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| GuardianError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
