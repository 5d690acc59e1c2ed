//! Product persistence.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{instrumented, RepositoryError};
use crate::domain::product::Product;
use crate::domain::Repository;
use crate::metrics::Metrics;

const ENTITY: &str = "Product";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Product::new(row.id.clone(), row.name, row.price)
            .map_err(|e| RepositoryError::invalid_record(ENTITY, row.id, e))
    }
}

/// Repository for product database operations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    metrics: Option<Arc<Metrics>>,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES (?, ?, ?)")
            .bind(product.id())
            .bind(product.name())
            .bind(product.price())
            .execute(&self.pool)
            .await?;

        tracing::debug!(product_id = %product.id(), "Inserted product");
        Ok(())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(product.name())
            .bind(product.price())
            .bind(product.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, product.id()));
        }
        Ok(())
    }

    async fn select(&self, id: &str) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        Product::try_from(row)
    }

    async fn select_all(&self) -> Result<Vec<Product>, RepositoryError> {
        sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products")
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }
}

#[async_trait]
impl Repository<Product> for ProductRepository {
    type Error = RepositoryError;

    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "product", "create", self.insert(product)).await
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "product", "update", self.save(product)).await
    }

    async fn find(&self, id: &str) -> Result<Product, RepositoryError> {
        instrumented(self.metrics.as_deref(), "product", "find", self.select(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        instrumented(self.metrics.as_deref(), "product", "find_all", self.select_all()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_pool;

    #[tokio::test]
    async fn test_create_and_find_product() {
        let repository = ProductRepository::new(test_pool().await);
        let product = Product::new("1", "Product 1", 100.0).unwrap();

        repository.create(&product).await.unwrap();

        assert_eq!(repository.find("1").await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_update_product() {
        let repository = ProductRepository::new(test_pool().await);
        let mut product = Product::new("1", "Product 1", 100.0).unwrap();
        repository.create(&product).await.unwrap();

        product.change_name("Product 2").unwrap();
        product.change_price(200.0).unwrap();
        repository.update(&product).await.unwrap();

        let found = repository.find("1").await.unwrap();
        assert_eq!(found.name(), "Product 2");
        assert_eq!(found.price(), 200.0);
    }

    #[tokio::test]
    async fn test_missing_product() {
        let repository = ProductRepository::new(test_pool().await);

        let err = repository.find("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Product with id nope not found");

        let ghost = Product::new("ghost", "Ghost", 1.0).unwrap();
        assert!(repository.update(&ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_find_all_products() {
        let repository = ProductRepository::new(test_pool().await);
        let product1 = Product::new("1", "Product 1", 100.0).unwrap();
        let product2 = Product::new("2", "Product 2", 200.0).unwrap();
        repository.create(&product1).await.unwrap();
        repository.create(&product2).await.unwrap();

        let products = repository.find_all().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.contains(&product1));
        assert!(products.contains(&product2));
    }
}
