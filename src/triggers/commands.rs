//! Named commands the user can invoke.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::document::Document;
use crate::error::{GuardianError, Result};
use crate::ui::UserInterface;

use super::subscription::Subscription;

/// Id of the manual fix command.
pub const FIX_ALL_COMMAND: &str = "wp-code-guardian.fixAll";

/// A command handler. Receives the active document, if there is one.
pub type CommandHandler =
    Arc<dyn Fn(Option<&Document>, &mut dyn UserInterface) -> Result<()> + Send + Sync>;

type HandlerMap = HashMap<String, (u64, CommandHandler)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HandlerMap,
}

/// Command table shared by everything that registers or invokes commands.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    ///
    /// Registering an existing name replaces its handler. The returned
    /// subscription removes the registration it created and nothing else.
    pub fn register<F>(&self, name: &str, handler: F) -> Result<Subscription>
    where
        F: Fn(Option<&Document>, &mut dyn UserInterface) -> Result<()> + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.lock()?;
            registry.next_id += 1;
            let id = registry.next_id;
            if registry
                .handlers
                .insert(name.to_string(), (id, Arc::new(handler)))
                .is_some()
            {
                tracing::debug!("Replacing handler for command {}", name);
            }
            id
        };

        let weak: Weak<Mutex<Registry>> = Arc::downgrade(&self.inner);
        let key = name.to_string();
        Ok(Subscription::new(format!("command:{}", name), move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let removed = match inner.lock() {
                Ok(mut registry)
                    if registry.handlers.get(&key).is_some_and(|(owner, _)| *owner == id) =>
                {
                    registry.handlers.remove(&key)
                }
                _ => None,
            };
            drop(removed);
        }))
    }

    /// Whether a command is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.lock()
            .map(|r| r.handlers.contains_key(name))
            .unwrap_or(false)
    }

    /// Invoke a command.
    ///
    /// # Errors
    ///
    /// `UnknownCommand` if nothing is registered under `name`, or whatever
    /// the handler returns.
    pub fn execute(
        &self,
        name: &str,
        active: Option<&Document>,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let handler = self
            .lock()?
            .handlers
            .get(name)
            .map(|(_, h)| Arc::clone(h))
            .ok_or_else(|| GuardianError::UnknownCommand {
                name: name.to_string(),
            })?;

        tracing::debug!("Executing command {}", name);
        handler(active, ui)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Registry>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("command registry poisoned").into())
    }
}
