use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::CustomerError;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Postal address owned by a customer. Immutable once built.
///
/// Deserializing goes through [`Address::new`], so a payload can't smuggle in
/// an address the constructor would refuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddressData")]
pub struct Address {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        number: i32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, CustomerError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.street.trim().is_empty() {
            return Err(CustomerError::EmptyStreet);
        }
        if self.number <= 0 {
            return Err(CustomerError::InvalidStreetNumber(self.number));
        }
        if self.zip.trim().is_empty() {
            return Err(CustomerError::EmptyZip);
        }
        if self.city.trim().is_empty() {
            return Err(CustomerError::EmptyCity);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Wire shape of [`Address`] before validation
#[derive(Deserialize)]
struct AddressData {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl TryFrom<AddressData> for Address {
    type Error = CustomerError;

    fn try_from(data: AddressData) -> Result<Self, Self::Error> {
        Address::new(data.street, data.number, data.zip, data.city)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
