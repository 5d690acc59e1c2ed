use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::Address;

// ============================================================================
// Customer Domain Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    pub id: String,
    pub name: String,
}

/// A customer was registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreatedEvent {
    pub occurred_at: DateTime<Utc>,
    pub data: CustomerCreatedData,
}

impl CustomerCreatedEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: CustomerCreatedData {
                id: id.into(),
                name: name.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChangedData {
    pub id: String,
    pub name: String,
    pub address: Address,
}

/// A customer's address was replaced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAddressChangedEvent {
    pub occurred_at: DateTime<Utc>,
    pub data: CustomerAddressChangedData,
}

impl CustomerAddressChangedEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: Address) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: CustomerAddressChangedData {
                id: id.into(),
                name: name.into(),
                address,
            },
        }
    }
}
