use crate::domain::product::{Product, ProductService};
use crate::domain::{DomainEventDispatcher, Repository};
use crate::infrastructure::RepositoryError;

use super::{publish, ApplicationError};

/// Product catalogue use cases
pub struct ProductCatalogService<'a, R> {
    repository: &'a R,
    dispatcher: &'a DomainEventDispatcher,
}

impl<'a, R> ProductCatalogService<'a, R>
where
    R: Repository<Product, Error = RepositoryError>,
{
    pub fn new(repository: &'a R, dispatcher: &'a DomainEventDispatcher) -> Self {
        Self { repository, dispatcher }
    }

    pub async fn register(&self, id: &str, name: &str, price: f64) -> Result<Product, ApplicationError> {
        let product = Product::new(id, name, price)?;
        self.repository.create(&product).await?;

        tracing::info!(product_id = %product.id(), price, "Registered product");

        publish(self.dispatcher, product.created_event())?;
        Ok(product)
    }

    /// Raise every stored price by `percentage` percent
    pub async fn increase_all_prices(&self, percentage: f64) -> Result<Vec<Product>, ApplicationError> {
        let mut products = self.repository.find_all().await?;
        ProductService::increase_price(&mut products, percentage)?;

        for product in &products {
            self.repository.update(product).await?;
        }
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::RecordingHandler;
    use crate::domain::product::SendEmailWhenProductIsCreatedHandler;
    use crate::domain::{DomainEvent, EventKind};
    use crate::infrastructure::db::test_pool;
    use crate::infrastructure::ProductRepository;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_publishes_product_created() {
        let repository = ProductRepository::new(test_pool().await);
        let recorder = RecordingHandler::new();
        let mut dispatcher = DomainEventDispatcher::new();
        dispatcher.register(EventKind::ProductCreated, Arc::new(SendEmailWhenProductIsCreatedHandler));
        dispatcher.register(EventKind::ProductCreated, recorder.clone());

        let service = ProductCatalogService::new(&repository, &dispatcher);
        service.register("p1", "Product 1", 10.0).await.unwrap();

        let seen = recorder.seen();
        assert_eq!(seen.len(), 1);
        assert!(matches!(&seen[0], DomainEvent::ProductCreated(e) if e.data.price == 10.0));
    }

    #[tokio::test]
    async fn test_increase_all_prices_persists() {
        let repository = ProductRepository::new(test_pool().await);
        let dispatcher = DomainEventDispatcher::new();
        let service = ProductCatalogService::new(&repository, &dispatcher);
        service.register("p1", "Product 1", 10.0).await.unwrap();
        service.register("p2", "Product 2", 20.0).await.unwrap();

        service.increase_all_prices(50.0).await.unwrap();

        assert_eq!(repository.find("p1").await.unwrap().price(), 15.0);
        assert_eq!(repository.find("p2").await.unwrap().price(), 30.0);
    }
}
