// ============================================================================
// Order Domain - Order aggregate (Order + OrderItem)
// ============================================================================

pub mod entity;
pub mod errors;
pub mod service;

pub use entity::*;
pub use errors::*;
pub use service::*;
