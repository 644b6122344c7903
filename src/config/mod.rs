//! Configuration loading for WP Guardian.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use wp_guardian::config::load_config;
//! use wp_guardian::workspace::Workspace;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".wp-guardian.yml"), "php:\n  standard: PSR12\n").unwrap();
//!
//! let ws = Workspace::new([temp.path().to_path_buf()]);
//! let config = load_config(&ws).unwrap();
//! assert_eq!(config.php.standard, "PSR12");
//! ```
//!
//! # Configuration File Location
//!
//! `.wp-guardian.yml` at the workspace root. It is optional; every key has
//! a default.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config};
pub use schema::{GuardianConfig, JavaScriptSettings, PhpSettings, SetupSettings, WatchSettings};
