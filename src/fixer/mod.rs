//! Fixer dispatch and execution.
//!
//! [`plan`] maps a document to the fixers it needs, and a
//! [`ProcessRunner`] starts them without waiting.

pub mod dispatch;
pub mod invocation;
pub mod runner;

pub use dispatch::plan;
pub use invocation::{FixInvocation, Tool};
pub use runner::{
    run_invocation, FixHandle, FixOutcome, ProcessRunner, RecordingRunner, ThreadRunner,
};
