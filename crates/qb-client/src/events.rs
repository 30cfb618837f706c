//! Session event bus.
//!
//! Observers register closures on an [`EventBus`] and are called whenever
//! the session held by a client changes. A bus is an ordinary value: each
//! client gets its own unless one is shared explicitly through an `Arc`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::Session;

/// Handle returned by [`EventBus::subscribe`].
pub type SubscriptionId = u64;

/// Callback invoked for every emitted event.
pub type EventHandler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// A change to the session held by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new application or user session was created.
    Created(Session),
    /// An existing session token was synced with the server.
    Synced(Session),
    /// The stored session was dropped.
    Cleared,
}

/// Registry of session event handlers.
#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, EventHandler)>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` and return an id for [`EventBus::unsubscribe`].
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Call every registered handler with `event`, in subscription order.
    pub fn emit(&self, event: &SessionEvent) {
        // Snapshot so handlers may subscribe or unsubscribe while running.
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.len())
            .finish()
    }
}
