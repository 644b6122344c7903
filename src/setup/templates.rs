//! Config templates embedded at compile time.

use include_dir::{include_dir, Dir};

use crate::error::Result;
use crate::workspace::{ESLINT_CONFIG, PHPCS_CONFIG};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A config file written verbatim into the workspace root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTemplate {
    /// Name of the file in the workspace root.
    pub file_name: &'static str,
    /// Name of the embedded source under `templates/`.
    pub source: &'static str,
}

/// The PHP ruleset and ESLint config, in the order they are written.
pub const CONFIG_TEMPLATES: [ConfigTemplate; 2] = [
    ConfigTemplate {
        file_name: PHPCS_CONFIG,
        source: "phpcs.xml",
    },
    ConfigTemplate {
        file_name: ESLINT_CONFIG,
        source: "eslintrc.json",
    },
];

impl ConfigTemplate {
    /// The template body.
    pub fn contents(&self) -> Result<&'static str> {
        let file = TEMPLATES_DIR.get_file(self.source).ok_or_else(|| {
            anyhow::anyhow!("Template '{}' is not embedded in this build", self.source)
        })?;

        file.contents_utf8()
            .ok_or_else(|| anyhow::anyhow!("Template '{}' is not valid UTF-8", self.source).into())
    }
}
