//! Trigger wiring: commands, save notifications, and the watcher that
//! produces them.

pub mod commands;
pub mod saves;
pub mod subscription;
pub mod watcher;

pub use commands::{CommandHandler, CommandRegistry, FIX_ALL_COMMAND};
pub use saves::{SaveEventBus, SaveHandler};
pub use subscription::Subscription;
pub use watcher::{is_ignored, is_save_kind, saved_paths, FsWatcher};
