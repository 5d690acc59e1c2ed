//! Customer persistence.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{instrumented, RepositoryError};
use crate::domain::customer::{Address, Customer};
use crate::domain::Repository;
use crate::metrics::Metrics;

const ENTITY: &str = "Customer";

// =============================================================================
// Internal Row Type
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    street: Option<String>,
    number: Option<i32>,
    zipcode: Option<String>,
    city: Option<String>,
    active: bool,
    #[sqlx(rename = "rewardPoints")]
    reward_points: f64,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let address = match (row.street, row.number, row.zipcode, row.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => Some(
                Address::new(street, number, zip, city)
                    .map_err(|e| RepositoryError::invalid_record(ENTITY, &row.id, e))?,
            ),
            (None, None, None, None) => None,
            _ => {
                return Err(RepositoryError::invalid_record(
                    ENTITY,
                    &row.id,
                    "partially stored address",
                ))
            }
        };

        Customer::restore(row.id.clone(), row.name, address, row.active, row.reward_points)
            .map_err(|e| RepositoryError::invalid_record(ENTITY, row.id, e))
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for customer database operations.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
    metrics: Option<Arc<Metrics>>,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn insert(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let address = customer.address();

        sqlx::query(
            "INSERT INTO customers (id, name, street, number, zipcode, city, active, rewardPoints)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.id())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(Address::number))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(customer.reward_points())
        .execute(&self.pool)
        .await?;

        tracing::debug!(customer_id = %customer.id(), "Inserted customer");
        Ok(())
    }

    async fn save(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let address = customer.address();

        let result = sqlx::query(
            "UPDATE customers
             SET name = ?, street = ?, number = ?, zipcode = ?, city = ?, active = ?, rewardPoints = ?
             WHERE id = ?",
        )
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(Address::number))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(customer.reward_points())
        .bind(customer.id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(ENTITY, customer.id()));
        }

        tracing::debug!(customer_id = %customer.id(), "Updated customer");
        Ok(())
    }

    async fn select(&self, id: &str) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, street, number, zipcode, city, active, rewardPoints
             FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found(ENTITY, id))?;

        Customer::try_from(row)
    }

    async fn select_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, street, number, zipcode, city, active, rewardPoints FROM customers",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }
}

#[async_trait]
impl Repository<Customer> for CustomerRepository {
    type Error = RepositoryError;

    async fn create(&self, customer: &Customer) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "customer", "create", self.insert(customer)).await
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        instrumented(self.metrics.as_deref(), "customer", "update", self.save(customer)).await
    }

    async fn find(&self, id: &str) -> Result<Customer, RepositoryError> {
        instrumented(self.metrics.as_deref(), "customer", "find", self.select(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        instrumented(self.metrics.as_deref(), "customer", "find_all", self.select_all()).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_pool;

    fn customer_with_address(id: &str, name: &str) -> Customer {
        let mut customer = Customer::new(id, name).unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
        customer
    }

    #[tokio::test]
    async fn test_create_and_find_customer() {
        let repository = CustomerRepository::new(test_pool().await);
        let customer = customer_with_address("123", "Customer 1");

        repository.create(&customer).await.unwrap();

        let found = repository.find("123").await.unwrap();
        assert_eq!(found, customer);
    }

    #[tokio::test]
    async fn test_customer_without_address_round_trips() {
        let repository = CustomerRepository::new(test_pool().await);
        let customer = Customer::new("123", "Customer 1").unwrap();

        repository.create(&customer).await.unwrap();

        let found = repository.find("123").await.unwrap();
        assert!(found.address().is_none());
        assert_eq!(found, customer);
    }

    #[tokio::test]
    async fn test_update_customer() {
        let repository = CustomerRepository::new(test_pool().await);
        let mut customer = customer_with_address("123", "Customer 1");
        repository.create(&customer).await.unwrap();

        customer.change_name("Customer 2").unwrap();
        customer.activate().unwrap();
        customer.add_reward_points(15.0).unwrap();
        customer.change_address(Address::new("Street 2", 2, "Zipcode 2", "City 2").unwrap());
        repository.update(&customer).await.unwrap();

        let found = repository.find("123").await.unwrap();
        assert_eq!(found, customer);
        assert!(found.is_active());
        assert_eq!(found.reward_points(), 15.0);
    }

    #[tokio::test]
    async fn test_update_missing_customer_fails() {
        let repository = CustomerRepository::new(test_pool().await);
        let customer = Customer::new("999", "Ghost").unwrap();

        let err = repository.update(&customer).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_missing_customer_fails_with_id() {
        let repository = CustomerRepository::new(test_pool().await);

        let err = repository.find("456abc").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Customer with id 456abc not found");
    }

    #[tokio::test]
    async fn test_find_all_customers() {
        let repository = CustomerRepository::new(test_pool().await);
        let customer1 = customer_with_address("1", "Customer 1");
        let mut customer2 = customer_with_address("2", "Customer 2");
        customer2.add_reward_points(20.0).unwrap();

        repository.create(&customer1).await.unwrap();
        repository.create(&customer2).await.unwrap();

        let customers = repository.find_all().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert!(customers.contains(&customer1));
        assert!(customers.contains(&customer2));
    }

    #[tokio::test]
    async fn test_duplicate_create_surfaces_persistence_error() {
        let repository = CustomerRepository::new(test_pool().await);
        let customer = customer_with_address("1", "Customer 1");
        repository.create(&customer).await.unwrap();

        let err = repository.create(&customer).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_partial_address_row_is_rejected() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO customers (id, name, street, active, rewardPoints) VALUES ('1', 'C', 'Street', 0, 0)")
            .execute(&pool)
            .await
            .unwrap();

        let err = CustomerRepository::new(pool).find("1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRecord { .. }));
    }

    #[tokio::test]
    async fn test_operations_are_recorded_in_metrics() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let repository = CustomerRepository::new(test_pool().await).with_metrics(metrics.clone());

        repository.create(&customer_with_address("1", "Customer 1")).await.unwrap();
        assert!(repository.find("missing").await.is_err());

        let text = metrics.render().unwrap();
        assert!(text.contains("repository=\"customer\""));
        assert!(text.contains("outcome=\"error\""));
    }
}
