// ============================================================================
// Event Dispatch Core - Generic Abstractions
// ============================================================================
//
// Nothing in here knows about Customer, Order or Product.
// Domain code supplies an enum of events and the kind tag that keys handlers.
//
// ============================================================================

pub mod event;
pub mod handler;

pub use event::{Event, serialize_event};
pub use handler::{EventHandler, HandlerError};
