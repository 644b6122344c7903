//! Disposable registration handles.

use std::fmt;

type Teardown = Box<dyn FnOnce() + Send>;

/// A live registration.
///
/// Disposing it, explicitly or by dropping it, runs its teardown once.
#[must_use = "dropping a Subscription unregisters it"]
pub struct Subscription {
    label: String,
    teardown: Option<Teardown>,
}

impl Subscription {
    /// Wrap a teardown closure.
    pub fn new(label: impl Into<String>, teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            label: label.into(),
            teardown: Some(Box::new(teardown)),
        }
    }

    /// What this subscription registered.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the teardown has already run.
    pub fn is_disposed(&self) -> bool {
        self.teardown.is_none()
    }

    /// Tear down the registration. Later calls do nothing.
    pub fn dispose(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            tracing::trace!("Disposing {}", self.label);
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
