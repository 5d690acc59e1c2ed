use crate::domain::customer::CustomerError;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order id is required")]
    EmptyId,

    #[error("Customer id is required")]
    EmptyCustomerId,

    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Order item id is required")]
    EmptyItemId,

    #[error("Order item product id is required")]
    EmptyProductId,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid item price: {0}")]
    InvalidPrice(f64),

    #[error("Order item {0} appears more than once")]
    DuplicateItem(String),

    #[error("Order item {0} not found")]
    ItemNotFound(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),
}
