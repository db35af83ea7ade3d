//! Synchronous event fan-out.
//!
//! Handlers run in subscription order on the publishing thread. A handler
//! that returns `Err` does not stop its siblings: the failure is logged and
//! handed back to the publisher.
//!
//! Handlers cannot publish from inside a publish call since the dispatcher is
//! borrowed mutably for its duration; chained events go through the caller.

use std::collections::HashMap;

use thiserror::Error;

use super::kind::{EventError, EventKind, EventRecord};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Box<dyn FnMut(u8, u8) -> HandlerResult + Send>;

/// A handler that returned an error during publish.
#[derive(Debug, Error)]
#[error("{kind} handler #{position} failed: {error}")]
pub struct HandlerFailure {
    pub kind: EventKind,
    /// Position of the handler in subscription order
    pub position: usize,
    pub error: HandlerError,
}

/// Ordered handler lists per event kind.
pub struct EventDispatcher {
    listeners: HashMap<EventKind, Vec<Handler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        let listeners = EventKind::ALL
            .into_iter()
            .map(|kind| (kind, Vec::new()))
            .collect();

        Self { listeners }
    }

    /// Append a handler for `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(u8, u8) -> HandlerResult + Send + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Subscribe by event name, e.g. `"padTouch"`.
    pub fn subscribe_named<F>(&mut self, name: &str, handler: F) -> Result<(), EventError>
    where
        F: FnMut(u8, u8) -> HandlerResult + Send + 'static,
    {
        let kind = name.parse()?;
        self.subscribe(kind, handler);
        Ok(())
    }

    /// Invoke every handler for `kind` in subscription order.
    pub fn publish(&mut self, kind: EventKind, index: u8, value: u8) -> Vec<HandlerFailure> {
        tracing::debug!("{}> {} {}", kind, index, value);

        let mut failures = Vec::new();
        let Some(handlers) = self.listeners.get_mut(&kind) else {
            return failures;
        };

        for (position, handler) in handlers.iter_mut().enumerate() {
            if let Err(error) = handler(index, value) {
                tracing::warn!("{} handler #{} failed: {}", kind, position, error);
                failures.push(HandlerFailure {
                    kind,
                    position,
                    error,
                });
            }
        }

        failures
    }

    pub fn publish_record(&mut self, record: EventRecord) -> Vec<HandlerFailure> {
        self.publish(record.kind, record.index, record.value)
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<EventKind, usize> = self
            .listeners
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}
