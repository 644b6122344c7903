//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! workspace settings once and routes CLI subcommands to their
//! implementations.

pub mod completions;
pub mod dispatcher;
pub mod fix;
pub mod setup;
pub mod watch;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
