use uuid::Uuid;

use crate::domain::customer::Customer;

use super::entity::{Order, OrderItem};
use super::errors::OrderError;

// ============================================================================
// Order Domain Service
// ============================================================================

pub struct OrderService;

impl OrderService {
    /// Build an order for `customer` and credit half its total as reward points
    pub fn place_order(customer: &mut Customer, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        let order = Order::new(Uuid::new_v4().to_string(), customer.id(), items)?;
        customer.add_reward_points(order.total() / 2.0)?;

        tracing::info!(
            order_id = %order.id(),
            customer_id = %customer.id(),
            total = order.total(),
            "Placed order"
        );

        Ok(order)
    }

    pub fn total(orders: &[Order]) -> f64 {
        orders.iter().map(Order::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem::new(id, format!("Item {id}"), price, "p1", quantity).unwrap()
    }

    #[test]
    fn test_place_order_awards_reward_points() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let order = OrderService::place_order(&mut customer, vec![item("i1", 10.0, 1)]).unwrap();

        assert_eq!(customer.reward_points(), 5.0);
        assert_eq!(order.total(), 10.0);
        assert_eq!(order.customer_id(), "c1");
        assert!(Uuid::parse_str(order.id()).is_ok());
    }

    #[test]
    fn test_place_order_without_items_fails() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let err = OrderService::place_order(&mut customer, vec![]).unwrap_err();

        assert!(matches!(err, OrderError::EmptyItems));
        assert_eq!(customer.reward_points(), 0.0);
    }

    #[test]
    fn test_total_of_all_orders() {
        let order1 = Order::new("o1", "c1", vec![item("i1", 100.0, 1)]).unwrap();
        let order2 = Order::new("o2", "c1", vec![item("i2", 200.0, 2)]).unwrap();

        assert_eq!(OrderService::total(&[order1, order2]), 500.0);
        assert_eq!(OrderService::total(&[]), 0.0);
    }
}
