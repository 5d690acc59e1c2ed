// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer id is required")]
    EmptyId,

    #[error("Customer name is required")]
    EmptyName,

    #[error("Address is mandatory to activate a customer")]
    MissingAddress,

    #[error("Reward points must not be negative: {0}")]
    NegativeRewardPoints(f64),

    #[error("Street is required")]
    EmptyStreet,

    #[error("Street number must be positive: {0}")]
    InvalidStreetNumber(i32),

    #[error("Zip is required")]
    EmptyZip,

    #[error("City is required")]
    EmptyCity,
}
