use std::collections::HashMap;
use std::sync::Arc;

use crate::metrics::Metrics;

use super::core::{Event, EventHandler, HandlerError};

// ============================================================================
// Event Dispatcher - Synchronous In-Process Fan-Out
// ============================================================================
//
// Maps an event kind to an ordered list of handlers.
//
// Rules:
// 1. Handlers run in registration order, on the caller's thread
// 2. Registering the same handler twice means it runs twice
// 3. The first handler failure aborts the rest and is returned to the caller
// 4. No queuing, no retry, no persistence
//
// There is no global instance. Whoever publishes owns (or borrows) one.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("handler {handler} failed on {kind}: {source}")]
    HandlerFailed {
        handler: &'static str,
        kind: String,
        #[source]
        source: HandlerError,
    },
}

pub struct EventDispatcher<E: Event + 'static> {
    handlers: HashMap<E::Kind, Vec<Arc<dyn EventHandler<E>>>>,
    metrics: Option<Arc<Metrics>>,
}

impl<E: Event + 'static> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Append a handler to the list for `kind`
    pub fn register(&mut self, kind: E::Kind, handler: Arc<dyn EventHandler<E>>) {
        tracing::debug!(event_kind = %kind, handler = handler.name(), "Registering event handler");
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Remove the first registration of this exact handler instance, if any
    pub fn unregister<H>(&mut self, kind: E::Kind, handler: &Arc<H>)
    where
        H: EventHandler<E> + ?Sized,
    {
        let target = Arc::as_ptr(handler).cast::<()>();

        if let Some(list) = self.handlers.get_mut(&kind) {
            if let Some(pos) = list
                .iter()
                .position(|registered| Arc::as_ptr(registered).cast::<()>() == target)
            {
                let removed = list.remove(pos);
                tracing::debug!(event_kind = %kind, handler = removed.name(), "Unregistered event handler");
            }
        }
    }

    pub fn unregister_all(&mut self) {
        self.handlers.clear();
        tracing::debug!("Cleared all event handlers");
    }

    /// Handlers currently registered for `kind`, in invocation order
    pub fn handlers(&self, kind: E::Kind) -> &[Arc<dyn EventHandler<E>>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Invoke every handler registered for the event's kind
    pub fn notify(&self, event: &E) -> Result<(), DispatchError> {
        let kind = event.kind();
        let handlers = self.handlers(kind);

        if handlers.is_empty() {
            tracing::debug!(event_kind = %kind, "No handlers registered, skipping");
            return Ok(());
        }

        tracing::debug!(
            event_kind = %kind,
            handler_count = handlers.len(),
            occurred_at = %event.occurred_at(),
            "Dispatching event"
        );

        for handler in handlers {
            if let Err(source) = handler.handle(event) {
                tracing::error!(
                    event_kind = %kind,
                    handler = handler.name(),
                    error = %source,
                    "Event handler failed, aborting dispatch"
                );

                if let Some(metrics) = &self.metrics {
                    metrics.record_handler_failure(&kind.to_string(), handler.name());
                }

                return Err(DispatchError::HandlerFailed {
                    handler: handler.name(),
                    kind: kind.to_string(),
                    source,
                });
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_event_dispatched(&kind.to_string(), handlers.len());
        }

        Ok(())
    }
}

impl<E: Event + 'static> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
