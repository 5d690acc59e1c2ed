// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with its entity, errors and,
// where it publishes anything, events and handlers.
//
// This layer knows nothing about SQL. Persistence goes through the
// `Repository` trait, implemented in src/infrastructure/.
//
// ============================================================================

pub mod customer;
pub mod order;
pub mod product;
pub mod events;
pub mod repository;

pub use events::{DomainEvent, DomainEventDispatcher, EventKind};
pub use repository::Repository;
