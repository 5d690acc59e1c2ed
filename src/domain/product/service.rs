use super::entity::Product;
use super::errors::ProductError;

// ============================================================================
// Product Domain Service
// ============================================================================

pub struct ProductService;

impl ProductService {
    /// Raise every price by `percentage` percent
    pub fn increase_price(products: &mut [Product], percentage: f64) -> Result<(), ProductError> {
        for product in products.iter_mut() {
            let new_price = product.price() * (1.0 + percentage / 100.0);
            product.change_price(new_price)?;
        }

        tracing::debug!(product_count = products.len(), percentage, "Adjusted product prices");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_price_of_all_products() {
        let mut products = vec![
            Product::new("p1", "Product 1", 10.0).unwrap(),
            Product::new("p2", "Product 2", 20.0).unwrap(),
        ];

        ProductService::increase_price(&mut products, 100.0).unwrap();

        assert_eq!(products[0].price(), 20.0);
        assert_eq!(products[1].price(), 40.0);
    }

    #[test]
    fn test_price_cannot_drop_below_zero() {
        let mut products = vec![Product::new("p1", "Product 1", 10.0).unwrap()];

        let err = ProductService::increase_price(&mut products, -150.0).unwrap_err();
        assert!(matches!(err, ProductError::NegativePrice(_)));
    }
}
