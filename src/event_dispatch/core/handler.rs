use super::event::Event;

// ============================================================================
// Event Handler Trait
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("I/O error while handling event: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Failed(String),
}

/// Single-method subscriber invoked synchronously by the dispatcher.
pub trait EventHandler<E: Event>: Send + Sync {
    fn handle(&self, event: &E) -> Result<(), HandlerError>;

    /// Name used in logs and errors
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
