use super::errors::CustomerError;
use super::events::{CustomerAddressChangedEvent, CustomerCreatedEvent};
use super::value_objects::Address;

// ============================================================================
// Customer Entity
// ============================================================================
//
// Construction has no side effects. Callers that need the CustomerCreated
// event ask for it with `created_event()` once the customer is persisted;
// `change_address` hands back the CustomerAddressChanged event to publish.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: f64,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0.0,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rebuild a customer from stored state
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: f64,
    ) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        if customer.active && customer.address.is_none() {
            return Err(CustomerError::MissingAddress);
        }
        if reward_points < 0.0 {
            return Err(CustomerError::NegativeRewardPoints(reward_points));
        }
        Ok(customer)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.id.trim().is_empty() {
            return Err(CustomerError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> f64 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    /// Replace the address and describe the change
    pub fn change_address(&mut self, address: Address) -> CustomerAddressChangedEvent {
        self.address = Some(address.clone());
        CustomerAddressChangedEvent::new(self.id.clone(), self.name.clone(), address)
    }

    pub fn activate(&mut self) -> Result<(), CustomerError> {
        if self.address.is_none() {
            return Err(CustomerError::MissingAddress);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn add_reward_points(&mut self, points: f64) -> Result<(), CustomerError> {
        if points < 0.0 {
            return Err(CustomerError::NegativeRewardPoints(points));
        }
        self.reward_points += points;
        Ok(())
    }

    pub fn created_event(&self) -> CustomerCreatedEvent {
        CustomerCreatedEvent::new(self.id.clone(), self.name.clone())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
