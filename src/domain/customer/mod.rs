// ============================================================================
// Customer Domain - Customer entity and everything around it
// ============================================================================
//
// - Value objects (Address)
// - Entity (Customer)
// - Events (CustomerCreated, CustomerAddressChanged)
// - Handlers (console notifications)
// - Errors (CustomerError enum)
//
// ============================================================================

pub mod value_objects;
pub mod entity;
pub mod events;
pub mod handlers;
pub mod errors;

// Re-export for convenience
pub use value_objects::*;
pub use entity::*;
pub use events::*;
pub use handlers::*;
pub use errors::*;
