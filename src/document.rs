//! Documents and language tags.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::workspace::absolutize;

/// Language tag assigned to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    Php,
    JavaScript,
    JavaScriptReact,
    TypeScriptReact,
    /// Any tag no fixer handles, kept verbatim.
    Other(String),
}

impl Language {
    /// Parse a host tag. Unknown tags become [`Language::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "php" => Self::Php,
            "javascript" => Self::JavaScript,
            "javascriptreact" => Self::JavaScriptReact,
            "typescriptreact" => Self::TypeScriptReact,
            other => Self::Other(other.to_string()),
        }
    }

    /// Assign a tag from the file extension.
    ///
    /// Plain `.ts` maps to `Other("typescript")`, which no fixer handles.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "php" => Self::Php,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "jsx" => Self::JavaScriptReact,
            "tsx" => Self::TypeScriptReact,
            "ts" | "mts" | "cts" => Self::Other("typescript".to_string()),
            "md" | "markdown" => Self::Other("markdown".to_string()),
            "" => Self::Other("plaintext".to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The host tag string.
    pub fn tag(&self) -> &str {
        match self {
            Self::Php => "php",
            Self::JavaScript => "javascript",
            Self::JavaScriptReact => "javascriptreact",
            Self::TypeScriptReact => "typescriptreact",
            Self::Other(tag) => tag,
        }
    }

    /// Whether the style-fixer applies.
    pub fn is_php(&self) -> bool {
        matches!(self, Self::Php)
    }

    /// Whether the linter auto-fix applies.
    pub fn is_lintable_script(&self) -> bool {
        matches!(
            self,
            Self::JavaScript | Self::JavaScriptReact | Self::TypeScriptReact
        )
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A saved or active document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Language tag.
    pub language: Language,
}

impl Document {
    /// Create a document with an explicit language.
    pub fn new(path: impl Into<PathBuf>, language: Language) -> Self {
        Self {
            path: absolutize(&path.into()),
            language,
        }
    }

    /// Open a document, tagging it by extension unless a tag is given.
    pub fn open(path: &Path, tag: Option<&str>) -> Self {
        let language = match tag {
            Some(t) => Language::from_tag(t),
            None => Language::from_path(path),
        };
        Self::new(path, language)
    }
}
