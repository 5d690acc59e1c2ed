// ============================================================================
// Event Dispatch Infrastructure
// ============================================================================
//
// Generic, in-process publish/subscribe plumbing.
// Concrete events and handlers live in src/domain/
//
// ============================================================================

// Core abstractions (GENERIC - works with any closed set of events)
mod core;
mod dispatcher;

pub use self::core::*;
pub use dispatcher::{DispatchError, EventDispatcher};
