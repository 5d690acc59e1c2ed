use super::errors::ProductError;
use super::events::ProductCreatedEvent;

// ============================================================================
// Product Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ProductError> {
        if self.id.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        validate_price(self.price)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: f64) -> Result<(), ProductError> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    pub fn created_event(&self) -> ProductCreatedEvent {
        ProductCreatedEvent::new(self.id.clone(), self.name.clone(), self.price)
    }
}

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() {
        return Err(ProductError::NonFinitePrice);
    }
    if price < 0.0 {
        return Err(ProductError::NegativePrice(price));
    }
    Ok(())
}
