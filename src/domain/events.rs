use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

use crate::event_dispatch::{Event, EventDispatcher, HandlerError};

use super::customer::{CustomerAddressChangedEvent, CustomerCreatedEvent};
use super::product::ProductCreatedEvent;

// ============================================================================
// Domain Events - the closed set of things that can be published
// ============================================================================

/// Tag that keys handler registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CustomerCreated,
    CustomerAddressChanged,
    ProductCreated,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::CustomerCreated => "CustomerCreated",
            EventKind::CustomerAddressChanged => "CustomerAddressChanged",
            EventKind::ProductCreated => "ProductCreated",
        };
        f.write_str(name)
    }
}

/// Union type for all domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "event")]
pub enum DomainEvent {
    CustomerCreated(CustomerCreatedEvent),
    CustomerAddressChanged(CustomerAddressChangedEvent),
    ProductCreated(ProductCreatedEvent),
}

impl Event for DomainEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            DomainEvent::CustomerCreated(_) => EventKind::CustomerCreated,
            DomainEvent::CustomerAddressChanged(_) => EventKind::CustomerAddressChanged,
            DomainEvent::ProductCreated(_) => EventKind::ProductCreated,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::CustomerCreated(e) => e.occurred_at,
            DomainEvent::CustomerAddressChanged(e) => e.occurred_at,
            DomainEvent::ProductCreated(e) => e.occurred_at,
        }
    }
}

impl From<CustomerCreatedEvent> for DomainEvent {
    fn from(event: CustomerCreatedEvent) -> Self {
        DomainEvent::CustomerCreated(event)
    }
}

impl From<CustomerAddressChangedEvent> for DomainEvent {
    fn from(event: CustomerAddressChangedEvent) -> Self {
        DomainEvent::CustomerAddressChanged(event)
    }
}

impl From<ProductCreatedEvent> for DomainEvent {
    fn from(event: ProductCreatedEvent) -> Self {
        DomainEvent::ProductCreated(event)
    }
}

pub type DomainEventDispatcher = EventDispatcher<DomainEvent>;

/// Console sink shared by the notification handlers
pub(crate) fn write_console_line(line: &str) -> Result<(), HandlerError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")?;
    Ok(())
}
