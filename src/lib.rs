//! WP Guardian - WordPress coding standards on every save.
//!
//! Runs `phpcbf` against PHP files and `eslint --fix` against JavaScript,
//! JSX and TSX files using the binaries installed in the workspace, and
//! provisions the `phpcs.xml` and `.eslintrc.json` those tools read.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.wp-guardian.yml` loading
//! - [`document`] - Documents and their language tags
//! - [`error`] - Error types and result aliases
//! - [`fixer`] - Fixer planning and asynchronous execution
//! - [`guardian`] - Activation context and trigger wiring
//! - [`setup`] - Config templates and tool installation
//! - [`shell`] - Program execution and shell detection
//! - [`triggers`] - Commands, save notifications and the file watcher
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`workspace`] - Workspace folders and project discovery
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use wp_guardian::config::GuardianConfig;
//! use wp_guardian::document::{Document, Language};
//! use wp_guardian::fixer::plan;
//! use wp_guardian::workspace::Workspace;
//!
//! let workspace = Workspace::new([PathBuf::from("/proj")]);
//! let doc = Document::new("/proj/src/Foo.php", Language::Php);
//! let runs = plan(&doc, &workspace, &GuardianConfig::default());
//! assert_eq!(
//!     runs[0].command_line(),
//!     r#""/proj/vendor/bin/phpcbf" --standard=WordPress "/proj/src/Foo.php""#
//! );
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod fixer;
pub mod guardian;
pub mod setup;
pub mod shell;
pub mod triggers;
pub mod ui;
pub mod workspace;

pub use error::{GuardianError, Result};
