// ============================================================================
// Product Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product id is required")]
    EmptyId,

    #[error("Product name is required")]
    EmptyName,

    #[error("Price must not be negative: {0}")]
    NegativePrice(f64),

    #[error("Price must be a finite number")]
    NonFinitePrice,
}
