use crate::domain::customer::Customer;
use crate::domain::order::{Order, OrderItem, OrderService};
use crate::domain::Repository;
use crate::infrastructure::RepositoryError;

use super::ApplicationError;

/// Places orders for stored customers.
///
/// The order and the customer's reward points are two aggregates written by
/// two separate calls; there is no transaction around the pair.
pub struct CheckoutService<'a, C, O> {
    customers: &'a C,
    orders: &'a O,
}

impl<'a, C, O> CheckoutService<'a, C, O>
where
    C: Repository<Customer, Error = RepositoryError>,
    O: Repository<Order, Error = RepositoryError>,
{
    pub fn new(customers: &'a C, orders: &'a O) -> Self {
        Self { customers, orders }
    }

    pub async fn place_order(&self, customer_id: &str, items: Vec<OrderItem>) -> Result<Order, ApplicationError> {
        let mut customer = self.customers.find(customer_id).await?;
        let order = OrderService::place_order(&mut customer, items)?;

        self.orders.create(&order).await?;
        self.customers.update(&customer).await?;
        Ok(order)
    }

    /// Sum of every stored order's total
    pub async fn revenue(&self) -> Result<f64, ApplicationError> {
        let orders = self.orders.find_all().await?;
        Ok(OrderService::total(&orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::Address;
    use crate::domain::product::Product;
    use crate::infrastructure::db::test_pool;
    use crate::infrastructure::{CustomerRepository, OrderRepository, ProductRepository};

    #[tokio::test]
    async fn test_place_order_persists_order_and_reward_points() {
        let pool = test_pool().await;
        let customers = CustomerRepository::new(pool.clone());
        let orders = OrderRepository::new(pool.clone());
        let products = ProductRepository::new(pool.clone());

        let mut customer = Customer::new("c1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zip", "City").unwrap());
        customers.create(&customer).await.unwrap();
        let product = Product::new("p1", "Product 1", 10.0).unwrap();
        products.create(&product).await.unwrap();

        let checkout = CheckoutService::new(&customers, &orders);
        let item = OrderItem::new("i1", product.name(), product.price(), product.id(), 4).unwrap();
        let order = checkout.place_order("c1", vec![item]).await.unwrap();

        assert_eq!(orders.find(order.id()).await.unwrap(), order);
        assert_eq!(customers.find("c1").await.unwrap().reward_points(), 20.0);
        assert_eq!(checkout.revenue().await.unwrap(), 40.0);
    }

    #[tokio::test]
    async fn test_place_order_for_unknown_customer() {
        let pool = test_pool().await;
        let customers = CustomerRepository::new(pool.clone());
        let orders = OrderRepository::new(pool);

        let checkout = CheckoutService::new(&customers, &orders);
        let err = checkout.place_order("ghost", vec![]).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Repository(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_place_order_without_items() {
        let pool = test_pool().await;
        let customers = CustomerRepository::new(pool.clone());
        let orders = OrderRepository::new(pool);
        customers.create(&Customer::new("c1", "Customer 1").unwrap()).await.unwrap();

        let checkout = CheckoutService::new(&customers, &orders);
        let err = checkout.place_order("c1", vec![]).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Order(crate::domain::order::OrderError::EmptyItems)));
        assert_eq!(checkout.revenue().await.unwrap(), 0.0);
    }
}
