//! "Document saved" notifications.

use std::sync::{Arc, Mutex, Weak};

use crate::document::Document;

use super::subscription::Subscription;

/// Save listener.
pub type SaveHandler = Arc<dyn Fn(&Document) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, SaveHandler)>,
}

/// Fan-out of saved documents to every live subscriber.
#[derive(Clone, Default)]
pub struct SaveEventBus {
    inner: Arc<Mutex<Listeners>>,
}

impl SaveEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every save until the subscription is disposed.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Document) + Send + Sync + 'static,
    {
        let id = match self.inner.lock() {
            Ok(mut listeners) => {
                listeners.next_id += 1;
                let id = listeners.next_id;
                listeners.handlers.push((id, Arc::new(handler)));
                id
            }
            Err(_) => {
                tracing::error!("save listeners poisoned, subscription ignored");
                0
            }
        };

        let weak: Weak<Mutex<Listeners>> = Arc::downgrade(&self.inner);
        Subscription::new("save", move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // Handlers are dropped after the lock is released.
            let removed: Vec<(u64, SaveHandler)> = match inner.lock() {
                Ok(mut listeners) => {
                    let (removed, kept) = std::mem::take(&mut listeners.handlers)
                        .into_iter()
                        .partition(|(owner, _)| *owner == id);
                    listeners.handlers = kept;
                    removed
                }
                Err(_) => Vec::new(),
            };
            drop(removed);
        })
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|l| l.handlers.len()).unwrap_or(0)
    }

    /// Deliver a save to every subscriber, in subscription order.
    pub fn emit(&self, document: &Document) {
        let handlers: Vec<SaveHandler> = match self.inner.lock() {
            Ok(listeners) => listeners.handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            Err(_) => return,
        };

        tracing::debug!(
            "Saved {} ({})",
            document.path.display(),
            document.language
        );
        for handler in handlers {
            handler(document);
        }
    }
}
