//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// WP Guardian - WordPress coding standards on every save.
#[derive(Debug, Parser)]
#[command(name = "wp-guardian")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace folder; repeat for several (overrides project discovery)
    #[arg(short, long = "workspace", value_name = "DIR", global = true)]
    pub workspace: Vec<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; answers come from WP_GUARDIAN_PROMPT_<KEY> or default to no
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write missing config files and offer to install missing tools
    Setup,

    /// Run the fixers on one file and wait for them
    Fix(FixArgs),

    /// Run the fixers on every file saved in the workspace
    Watch,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FixArgs {
    /// File to fix
    pub file: PathBuf,

    /// Language tag to use instead of guessing from the extension
    #[arg(short, long, value_name = "TAG")]
    pub language: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
