use async_trait::async_trait;

/// Persistence contract shared by every aggregate.
///
/// Each call is a single round-trip to the store: no caching, no retry,
/// no batching.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create(&self, entity: &T) -> Result<(), Self::Error>;

    async fn update(&self, entity: &T) -> Result<(), Self::Error>;

    async fn find(&self, id: &str) -> Result<T, Self::Error>;

    async fn find_all(&self) -> Result<Vec<T>, Self::Error>;
}
