// ============================================================================
// Product Domain
// ============================================================================

pub mod entity;
pub mod events;
pub mod handlers;
pub mod errors;
pub mod service;

pub use entity::*;
pub use events::*;
pub use handlers::*;
pub use errors::*;
pub use service::*;
