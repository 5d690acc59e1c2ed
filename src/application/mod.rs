// ============================================================================
// Application Layer - use cases
// ============================================================================
//
// Orchestrates: Entity → Repository → Dispatcher
//
// Entities never publish on their own. A use case persists the change first
// and only then pushes the resulting event through the dispatcher it was
// handed, so a failed write never announces anything.
//
// ============================================================================

mod customer;
mod order;
mod product;

pub use customer::CustomerService;
pub use order::CheckoutService;
pub use product::ProductCatalogService;

use crate::domain::customer::CustomerError;
use crate::domain::order::OrderError;
use crate::domain::product::ProductError;
use crate::domain::{DomainEvent, DomainEventDispatcher};
use crate::event_dispatch::{serialize_event, DispatchError};
use crate::infrastructure::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Hand a persisted change's event to every registered handler
pub(crate) fn publish(
    dispatcher: &DomainEventDispatcher,
    event: impl Into<DomainEvent>,
) -> Result<(), DispatchError> {
    let event = event.into();
    match serialize_event(&event) {
        Ok(payload) => tracing::trace!(%payload, "Publishing domain event"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize domain event payload"),
    }
    dispatcher.notify(&event)
}
